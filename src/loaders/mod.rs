pub mod gltf;

pub use gltf::decode_gltf;
