//! Entity registry: the static table of entity kinds, their dependents and
//! their read policies.
//!
//! Deactivating an entity is blocked while any of its registered dependents
//! is still Active. The registry records those links once so the guard and
//! both store backends derive their checks from the same data instead of
//! repeating per-entity rules.

/// The ten entity kinds served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Catalog,
    Album,
    Artist,
    ProductType,
    Supplier,
    Building,
    Location,
    Stock,
    Inventory,
}

impl EntityKind {
    /// All kinds, in registry order.
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Product,
        EntityKind::Catalog,
        EntityKind::Album,
        EntityKind::Artist,
        EntityKind::ProductType,
        EntityKind::Supplier,
        EntityKind::Building,
        EntityKind::Location,
        EntityKind::Stock,
        EntityKind::Inventory,
    ];

    /// SQL table name for this kind.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Catalog => "catalogs",
            EntityKind::Album => "albums",
            EntityKind::Artist => "artists",
            EntityKind::ProductType => "product_types",
            EntityKind::Supplier => "suppliers",
            EntityKind::Building => "buildings",
            EntityKind::Location => "locations",
            EntityKind::Stock => "stocks",
            EntityKind::Inventory => "inventories",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display(self) -> &'static str {
        match self {
            EntityKind::Product => "Product",
            EntityKind::Catalog => "Catalog",
            EntityKind::Album => "Album",
            EntityKind::Artist => "Artist",
            EntityKind::ProductType => "ProductType",
            EntityKind::Supplier => "Supplier",
            EntityKind::Building => "Building",
            EntityKind::Location => "Location",
            EntityKind::Stock => "Stock",
            EntityKind::Inventory => "Inventory",
        }
    }
}

/// A foreign-key link from a dependent kind back to the guarded kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependentLink {
    /// Kind holding the foreign key.
    pub dependent: EntityKind,
    /// Column in the dependent's table referencing the guarded entity (or,
    /// for transitive links, referencing the hop entity).
    pub foreign_key: &'static str,
    /// Transitive links resolve through an intermediate kind: collect ids
    /// of `through` rows whose `foreign_key` points at the guarded entity,
    /// then match the outer link against that id set. The hop collects rows
    /// of any status.
    pub via: Option<TransitiveHop>,
}

/// The intermediate step of a transitive [`DependentLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitiveHop {
    pub through: EntityKind,
    pub foreign_key: &'static str,
}

/// Dependents that must be Inactive (or absent) before a kind may be
/// deactivated, in check order.
pub fn dependents_of(kind: EntityKind) -> &'static [DependentLink] {
    match kind {
        EntityKind::Product => &[
            DependentLink {
                dependent: EntityKind::Inventory,
                foreign_key: "product_id",
                via: None,
            },
            DependentLink {
                dependent: EntityKind::Stock,
                foreign_key: "product_id",
                via: None,
            },
        ],
        EntityKind::Catalog => &[DependentLink {
            dependent: EntityKind::Product,
            foreign_key: "catalog_id",
            via: None,
        }],
        EntityKind::Album => &[DependentLink {
            dependent: EntityKind::Product,
            foreign_key: "album_id",
            via: None,
        }],
        // Albums are collected regardless of their own status; only the
        // products hanging off them have to be Active to block.
        EntityKind::Artist => &[DependentLink {
            dependent: EntityKind::Product,
            foreign_key: "album_id",
            via: Some(TransitiveHop {
                through: EntityKind::Album,
                foreign_key: "artist_id",
            }),
        }],
        EntityKind::ProductType => &[DependentLink {
            dependent: EntityKind::Product,
            foreign_key: "product_type_id",
            via: None,
        }],
        EntityKind::Supplier => &[],
        EntityKind::Building => &[DependentLink {
            dependent: EntityKind::Location,
            foreign_key: "building_id",
            via: None,
        }],
        EntityKind::Location => &[DependentLink {
            dependent: EntityKind::Inventory,
            foreign_key: "location_id",
            via: None,
        }],
        EntityKind::Stock => &[DependentLink {
            dependent: EntityKind::Inventory,
            foreign_key: "stock_id",
            via: None,
        }],
        EntityKind::Inventory => &[],
    }
}

/// Per-entity read behavior preserved from the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Single-item GET treats rows that exist but are Inactive as missing.
    pub filter_active_get: bool,
    /// Listing an empty collection is reported as missing rather than `[]`.
    pub empty_list_as_404: bool,
}

/// Read policy for a kind. Only Album, Artist and ProductType hide inactive
/// rows from single-item reads; every kind treats an empty list as missing.
pub fn read_policy(kind: EntityKind) -> ReadPolicy {
    let filter_active_get = matches!(
        kind,
        EntityKind::Album | EntityKind::Artist | EntityKind::ProductType
    );
    ReadPolicy {
        filter_active_get,
        empty_list_as_404: true,
    }
}
