use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable, hierarchical dot-path addressing one part of the mapping
/// model, e.g. `Order.lineItems.product`.
///
/// Paths are the identity keys for table-group and selection caches across
/// the resolution layer, so equality and hashing are structural: two paths
/// are equal iff their segment sequences (including synthetic markers)
/// match. The full rendering is computed once at construction, which keeps
/// hashing O(1) over an interned string rather than a segment walk.
#[derive(Clone)]
pub struct NavigablePath {
    inner: Arc<Inner>,
}

struct Inner {
    parent: Option<NavigablePath>,
    local_name: String,

    /// True for marker segments that do not correspond to a declared
    /// attribute (e.g. an element or index accessor injected during
    /// resolution). Rendered parenthesized so `a.(elements)` never collides
    /// with a real attribute named `elements`.
    synthetic: bool,

    /// Cached full rendering, used for equality, hashing and display.
    full_path: String,
}

impl NavigablePath {
    /// Creates a root path, typically named after an entity.
    pub fn root(name: impl Into<String>) -> NavigablePath {
        let name = name.into();
        NavigablePath {
            inner: Arc::new(Inner {
                parent: None,
                full_path: name.clone(),
                local_name: name,
                synthetic: false,
            }),
        }
    }

    /// Appends an attribute segment, returning the child path.
    pub fn append(&self, segment: impl Into<String>) -> NavigablePath {
        self.append_inner(segment.into(), false)
    }

    /// Appends a synthetic marker segment, rendered as `(segment)`.
    pub fn append_synthetic(&self, segment: impl Into<String>) -> NavigablePath {
        self.append_inner(segment.into(), true)
    }

    fn append_inner(&self, segment: String, synthetic: bool) -> NavigablePath {
        let full_path = if synthetic {
            format!("{}.({})", self.inner.full_path, segment)
        } else {
            format!("{}.{}", self.inner.full_path, segment)
        };

        NavigablePath {
            inner: Arc::new(Inner {
                parent: Some(self.clone()),
                local_name: segment,
                synthetic,
                full_path,
            }),
        }
    }

    pub fn parent(&self) -> Option<&NavigablePath> {
        self.inner.parent.as_ref()
    }

    pub fn local_name(&self) -> &str {
        &self.inner.local_name
    }

    pub fn is_synthetic(&self) -> bool {
        self.inner.synthetic
    }

    pub fn full_path(&self) -> &str {
        &self.inner.full_path
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Returns `true` if `self` is a strict ancestor of `other`.
    pub fn is_parent_of(&self, other: &NavigablePath) -> bool {
        let mut current = other.parent();
        while let Some(path) = current {
            if path == self {
                return true;
            }
            current = path.parent();
        }
        false
    }
}

impl PartialEq for NavigablePath {
    fn eq(&self, other: &Self) -> bool {
        // The cached rendering encodes segments and synthetic markers, so
        // string equality is structural equality.
        Arc::ptr_eq(&self.inner, &other.inner)
            || self.inner.full_path == other.inner.full_path
    }
}

impl Eq for NavigablePath {}

impl Hash for NavigablePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.full_path.hash(state);
    }
}

impl fmt::Display for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.full_path)
    }
}

impl fmt::Debug for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavigablePath({})", self.inner.full_path)
    }
}
