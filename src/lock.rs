//! Lock abstraction for the store
//!
//! [`Environ`](crate::Environ) is generic over the raw reader/writer lock
//! guarding its map. Any type implementing [`RawRwLock`] works; its four
//! primitives are the whole contract:
//!
//! - `lock_shared` / `unlock_shared` around every read
//! - `lock_exclusive` / `unlock_exclusive` around every write
//!
//! Guards are RAII, so every exit path (including errors and panics)
//! releases what it acquired. Tests substitute instrumented locks to check
//! exactly that.

pub use parking_lot::lock_api::RawRwLock;

/// Lock used when no other is requested.
pub type DefaultLock = parking_lot::RawRwLock;

/// Lock-protected map, parameterized over the raw lock.
pub(crate) type RwLock<R, T> = parking_lot::lock_api::RwLock<R, T>;
