pub mod label_store;

pub use label_store::LabelStore;
