mod dataset_preparer;

pub use dataset_preparer::prepare_dataset;
