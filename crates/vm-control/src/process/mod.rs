mod child;
mod handle;
mod spawner;

pub use child::{ChildProcess, ExitInfo, ServerProcess};
pub use handle::ServerHandle;
pub use spawner::{DetachedSpawner, ProcessSpawner, SpawnSpec};
