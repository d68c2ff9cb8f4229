#[cfg(feature = "core")]
#[doc(inline)]
pub use annoq_core as core;

#[cfg(feature = "client")]
#[doc(inline)]
pub use annoq_client as client;
