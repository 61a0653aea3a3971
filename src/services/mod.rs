pub mod cache;
pub mod encoding;
pub mod normalize;
pub mod omdb;
pub mod pipeline;
pub mod reconcile;
pub mod table_io;
