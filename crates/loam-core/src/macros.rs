#[macro_export]
macro_rules! navigable_path {
    (
        $root:expr $( , $segment:expr )* $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut path = $crate::NavigablePath::root($root);
        $(
            path = path.append($segment);
        )*
        path
    }};
}
