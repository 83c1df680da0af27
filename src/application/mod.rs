mod app;
mod camera;
pub mod params;
mod session;

pub use app::App;
pub use camera::OrbitCamera;
pub use params::{ParamError, Reconfigure, SceneParams, algorithm_from_env, seed_from_env};
pub use session::{LAYER_SHIFT_INTERVAL, STEP_INTERVAL, Session, StepReport};
