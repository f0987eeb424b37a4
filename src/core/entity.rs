use std::fmt::{self, Display, Formatter};

use glam::Vec3;

use super::{Material, Mesh, Side, Transform};

/// What role an entity plays in the garden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Sky,
    Ground,
    Cube,
    Tree,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Sky => write!(f, "sky"),
            EntityKind::Ground => write!(f, "ground"),
            EntityKind::Cube => write!(f, "cube"),
            EntityKind::Tree => write!(f, "tree"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub mesh: Mesh,
    pub material: Material,
    pub side: Side,
    pub transform: Transform,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Entity: {:?} ({}, {})", self.name, self.kind, self.material)
    }
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            kind,
            mesh,
            material,
            side: Side::Front,
            transform: Transform::new(),
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.transform.set_position(pos);
        self
    }

    pub fn with_rotation(mut self, rot: Vec3) -> Self {
        self.transform.set_rotation(rot);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }
}
