//! Studio event bus.

pub mod bus;

pub use bus::{EventBus, StudioEvent};
pub use bus::{
    CHARACTERS_GENERATED, GENERATION_FAILED, NARRATIVE_ENHANCED, PROJECT_CREATED,
    SCENES_GENERATED, SCENE_IMAGES_GENERATED,
};
