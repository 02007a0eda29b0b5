pub mod bullet;
pub mod entity;
pub mod hero;
pub mod layer;
pub mod slime;
