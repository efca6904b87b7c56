//! Uniform values and the sprite/caller merge.

/// Sprite's diffuse texture.
pub const U_DIFFUSE: &str = "u_diffuse";
/// Sprite's normal texture (real or synthesized flat).
pub const U_NORMAL: &str = "u_normal";
/// World position of the sprite's unrotated top-left corner.
pub const U_WORLD_POSITION: &str = "u_world_position";
/// Quad size in world pixels (texture dimensions × scale).
pub const U_WORLD_SIZE: &str = "u_world_size";

/// A single shader uniform value, generic over the backend texture handle.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue<T> {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Texture(T),
}

/// Insertion-ordered uniform map with replace-on-set semantics.
#[derive(Debug, Clone)]
pub struct UniformSet<T> {
    entries: Vec<(String, UniformValue<T>)>,
}

impl<T> UniformSet<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserts `value` under `name`, replacing any existing entry.
    pub fn set(&mut self, name: impl Into<String>, value: UniformValue<T>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue<T>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue<T>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for UniformSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges sprite-intrinsic uniforms with caller-supplied extras.
///
/// Precedence, by write order:
/// 1. `u_diffuse` and `u_normal` (intrinsic textures) — written first, so
///    `extra` MAY override them when a caller wants to substitute a
///    different texture at assembly time;
/// 2. `extra`, in its own order;
/// 3. `u_world_position` and `u_world_size` — written last and therefore
///    never overridable: they are derived from live sprite state and the
///    reconciler keeps rewriting them.
pub fn assemble_uniforms<T: Clone>(
    diffuse: &T,
    normal: &T,
    world_position: [f32; 2],
    world_size: [f32; 2],
    extra: &UniformSet<T>,
) -> UniformSet<T> {
    let mut set = UniformSet::new();
    set.set(U_DIFFUSE, UniformValue::Texture(diffuse.clone()));
    set.set(U_NORMAL, UniformValue::Texture(normal.clone()));
    for (name, value) in extra.iter() {
        set.set(name, value.clone());
    }
    set.set(U_WORLD_POSITION, UniformValue::Vec2(world_position));
    set.set(U_WORLD_SIZE, UniformValue::Vec2(world_size));
    set
}
