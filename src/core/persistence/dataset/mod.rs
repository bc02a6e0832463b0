pub mod dataset_codec;
pub mod github_dataset_repository;
pub mod local_snapshot_fs_adapter;
pub mod local_snapshot_repository_trait;
pub mod remote_dataset_repository_trait;
pub mod run_record_entity;
pub mod sample_entity;
