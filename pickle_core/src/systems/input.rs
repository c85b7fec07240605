use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Copy the human's held keys onto the human paddle's intent
pub fn ingest_inputs(world: &mut World, input: &InputState) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        if paddle.is_human() {
            intent.move_left = input.move_left;
            intent.move_right = input.move_right;
        }
    }
}
