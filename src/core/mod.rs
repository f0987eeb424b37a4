pub mod camera;
pub mod color;
pub mod entity;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod sky;
pub mod transform;

pub use camera::Camera;
pub use color::Color;
pub use entity::{Entity, EntityKind};
pub use light::DirectionalLight;
pub use material::{Material, Side};
pub use mesh::{Mesh, Vertex};
pub use scene::Scene;
pub use sky::SkyGradient;
pub use transform::Transform;
