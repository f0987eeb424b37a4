use crate::core::camera::Camera;

use super::{DirectionalLight, Entity, EntityKind};

/// Everything that gets drawn: entities, lights and the single active camera.
///
/// Cubes that animate are inserted with [`Scene::add_rotating`], which records
/// their index in the update list so the frame driver can reach them without
/// walking every entity. Nothing is ever removed, so the indices stay valid.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub entities: Vec<Entity>,
    pub lights: Vec<DirectionalLight>,
    rotating: Vec<usize>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            entities: Vec::new(),
            lights: Vec::new(),
            rotating: Vec::new(),
        }
    }

    /// Add a static entity and return its index.
    pub fn add_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Add an entity that is also spun every frame.
    pub fn add_rotating(&mut self, entity: Entity) -> usize {
        let idx = self.add_entity(entity);
        self.rotating.push(idx);
        idx
    }

    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    /// Indices of the entities in the update list.
    pub fn rotating(&self) -> &[usize] {
        &self.rotating
    }

    pub fn rotating_entities(&self) -> impl Iterator<Item = &Entity> {
        self.rotating.iter().map(|&i| &self.entities[i])
    }

    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities_of(kind).count()
    }

    /// Advance every rotating entity about its local X and Y axes.
    pub fn spin(&mut self, step: f32) {
        for &i in &self.rotating {
            self.entities[i].transform.rotate_euler(step, step, 0.0);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Material, Mesh};

    fn cube(name: &str) -> Entity {
        Entity::new(
            name,
            EntityKind::Cube,
            Mesh::cube(1.0, 1.0, 1.0),
            Material::phong(Color::RED),
        )
    }

    #[test]
    fn rotating_entities_are_tracked_in_both_lists() {
        let mut scene = Scene::default();
        scene.add_entity(Entity::new(
            "ground",
            EntityKind::Ground,
            Mesh::plane(1.0, 1.0),
            Material::basic(Color::GREEN),
        ));
        let a = scene.add_rotating(cube("a"));
        let b = scene.add_rotating(cube("b"));

        assert_eq!(scene.rotating(), &[a, b]);
        assert_eq!(scene.count_of(EntityKind::Cube), scene.rotating().len());
        assert!(scene.rotating_entities().all(|e| e.kind == EntityKind::Cube));
    }

    #[test]
    fn spin_leaves_static_entities_alone() {
        let mut scene = Scene::default();
        let tree = scene.add_entity(Entity::new(
            "tree",
            EntityKind::Tree,
            Mesh::cone(0.5, 2.0, 8),
            Material::phong(Color::FOREST_GREEN),
        ));
        let c = scene.add_rotating(cube("c"));

        scene.spin(0.01);
        scene.spin(0.01);

        assert_eq!(scene.entities[tree].transform.rotation(), glam::Vec3::ZERO);
        let r = scene.entities[c].transform.rotation();
        assert!((r.x - 0.02).abs() < 1e-6);
        assert!((r.y - 0.02).abs() < 1e-6);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn spinning_keeps_positions_fixed() {
        let mut scene = Scene::default();
        let pos = glam::Vec3::new(-3.0, 0.5, 4.0);
        let c = scene.add_rotating(cube("c").with_position(pos));

        for _ in 0..250 {
            scene.spin(0.01);
        }

        let cube = &scene.entities[c];
        assert_eq!(cube.position(), pos);
        // the model matrix carries the spin but never moves or scales the cube
        let origin = cube.transform.model_mat().transform_point3(glam::Vec3::ZERO);
        assert!((origin - pos).length() < 1e-6);
        let edge = cube.transform.model_mat().transform_vector3(glam::Vec3::X);
        assert!((edge.length() - 1.0).abs() < 1e-5);
    }
}
