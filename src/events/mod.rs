mod pointer;

pub use pointer::PointerSubscription;
