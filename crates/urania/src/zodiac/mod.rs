pub mod decans;
pub mod projector;
pub mod tables;

pub use decans::{decan_for, decan_index, Decan};
pub use projector::{
    is_retrograde, project_longitude, PointPlacement, SignPosition, SystemPlacements,
    ZodiacProjector,
};
pub use tables::{
    angular_separation, arc_contains, normalize_degrees, sign_table, Element, Modality, Sign,
    SignDefinition, SignTable, ZodiacSystem, ALL_ELEMENTS, ALL_MODALITIES, ALL_SYSTEMS,
};
