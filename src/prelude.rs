//! Commonly used types.
//!
//! ```
//! use anatomy_tint::prelude::*;
//! ```

pub use crate::config::{EngineConfig, OPAQUE_ALPHA_THRESHOLD};
pub use crate::controls::{GroupSlider, OrganSlider, SliderController, SliderPanel};
pub use crate::error::{ConfigError, PresetError, SceneError};
pub use crate::events::{AlphaApplied, NotificationBus, SubscriptionId};
pub use crate::gfx::{
    color::Rgba,
    rendering::{effective_color, DrawOverrides},
    resources::{
        is_transparent, CullMode, DepthWrite, Material, MaterialHandle, MaterialManager,
        SurfaceMode, VariantCache,
    },
    scene::{MeshRenderer, NodeId, Scene},
};
pub use crate::preset::{EntityState, Preset, PresetEngine, PresetRecord, PresetReport};
pub use crate::sync::{
    normalize, ColorMode, EntityKey, RenderableBinding, RenderableRegistry, SyncContext,
};
