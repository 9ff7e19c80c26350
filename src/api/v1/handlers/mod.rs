pub mod health;
pub mod hello_world;
pub mod hello_world_auth;
pub mod random_dog;
