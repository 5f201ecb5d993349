mod analyze;
mod apply;
mod context;
mod ignore;
mod map;
mod restore;
mod sdkconfig;

pub use analyze::cmd_analyze;
pub use apply::cmd_apply;
pub use context::ProjectArgs;
pub use ignore::cmd_ignore;
pub use map::cmd_map;
pub use restore::cmd_restore;
pub use sdkconfig::cmd_sdkconfig;
