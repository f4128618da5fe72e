use crate::schema::db::JdbcType;

/// Boot-time entity descriptor, produced by external metadata readers.
///
/// Descriptors are plain data consumed through getters; loam never parses
/// configuration sources itself. They are mutable up to registration and
/// consumed whole by [`super::MappingModelBuilder::register_entity`].
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub name: String,
    pub table: String,
    pub identifier: IdentifierDescriptor,
    pub natural_id: Option<NaturalIdDescriptor>,
    pub attributes: Vec<AttributeDescriptor>,
}

#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    pub name: String,
    pub nullable: bool,
    pub kind: AttributeKindDescriptor,
}

#[derive(Debug, Clone)]
pub enum AttributeKindDescriptor {
    Basic {
        source: ColumnSource,
        jdbc_type: JdbcType,
    },

    Embedded {
        /// The embeddable type name, used to detect self-referencing
        /// composites during expansion.
        type_name: String,
        attributes: Vec<AttributeDescriptor>,
    },

    /// A to-one reference; expands to the target identifier's columns in
    /// 1:1 positional correspondence with `fk_columns`.
    EntityRef {
        target_entity: String,
        fk_columns: Vec<String>,
    },

    Plural {
        collection_table: String,

        /// FK columns on the collection table pointing back at the owner's
        /// identifier, in identifier-column order.
        key_columns: Vec<String>,

        element: ElementDescriptor,
    },

    /// An any-valued association: a discriminator column naming the target
    /// type plus a key column holding the target identifier.
    Discriminated {
        discriminator_column: String,
        key_column: String,
        key_jdbc_type: JdbcType,
    },
}

#[derive(Debug, Clone)]
pub enum ColumnSource {
    Column(String),
    Formula(String),
}

#[derive(Debug, Clone)]
pub enum ElementDescriptor {
    Basic {
        column: String,
        jdbc_type: JdbcType,
    },
    Entity {
        target_entity: String,
        fk_columns: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub enum IdentifierDescriptor {
    Basic {
        attribute: String,
        column: String,
        jdbc_type: JdbcType,
    },
    Embedded {
        attributes: Vec<IdentifierAttributeDescriptor>,
    },
    /// An ID-class: a separate class mirroring the virtual identifier
    /// embeddable attribute-for-attribute.
    IdClass {
        class_name: String,
        attributes: Vec<IdentifierAttributeDescriptor>,
    },
}

#[derive(Debug, Clone)]
pub struct IdentifierAttributeDescriptor {
    pub name: String,
    pub column: String,
    pub jdbc_type: JdbcType,
}

#[derive(Debug, Clone)]
pub struct NaturalIdDescriptor {
    /// Names of entity attributes forming the natural id, in declaration
    /// order.
    pub attributes: Vec<String>,

    /// Mutable natural ids skip the flush-time snapshot comparison.
    pub mutable: bool,
}
