pub mod db;
pub mod product {
    pub mod entity;
    pub mod file_repository;
    pub mod line_codec;
    pub mod repository;
}
