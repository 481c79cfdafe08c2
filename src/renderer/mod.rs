//! Scene rendering module
//!
//! Draws onto any [`Surface`]; the browser build uses Canvas 2D
//! (see `platform::canvas`).

pub mod icons;
pub mod scene;
pub mod style;
pub mod surface;

pub use icons::{IconCache, IconLoader, IconSlot, IconState, devicon_url};
pub use scene::{Hud, SceneRenderer};
pub use style::{RenderStyle, with_alpha};
pub use surface::{Paint, RadialGradient, Surface, TextAlign, TextBaseline, TextStyle};
