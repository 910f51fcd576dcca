pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::sieve::SieveCache;
pub use crate::traits::{CacheConfig, CoreCache, MutableCache, ReadOnlyCache};
