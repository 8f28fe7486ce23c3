//! Render data collection.

use crate::assets::ModelHandle;
use crate::components::{AnimatedCharacter, Model, Transform};
use hecs::World;

/// Data needed to draw one scene entity
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntity {
    pub model: ModelHandle,
    pub transform: Transform,
    /// Current clip and time into it, if animated
    pub animation: Option<(&'static str, f32)>,
}

/// Collect every entity that has a model, in spawn order
pub fn collect_renderables(world: &World) -> Vec<RenderEntity> {
    let mut entities: Vec<(hecs::Entity, RenderEntity)> = world
        .query::<(&Model, &Transform, Option<&AnimatedCharacter>)>()
        .iter()
        .map(|(id, (model, transform, animation))| {
            (
                id,
                RenderEntity {
                    model: model.0.clone(),
                    transform: *transform,
                    animation: animation.map(|a| (a.state.clip_name(), a.time)),
                },
            )
        })
        .collect();
    entities.sort_by_key(|(id, _)| id.id());
    entities.into_iter().map(|(_, entity)| entity).collect()
}
