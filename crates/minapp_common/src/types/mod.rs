pub mod chunk_kind;
pub mod compiler_id;
pub mod entry_point;
pub mod module;
pub mod output_asset;
pub mod raw_idx;
