use super::*;
use crate::scene::Ground;
use emberglade_shared::math::PlanarExt;
use emberglade_shared::{MonsterEntity, MonsterRegistry, SpellId, Terrain};

/// Monsters closer than this interrupt the patrol.
pub const ENGAGE_DISTANCE: f32 = 15.0;
/// Live monsters inside the nova radius before it is worth casting.
pub const NOVA_CROWD: usize = 2;

/// The closest monster that is still standing, if any.
pub fn nearest_live(registry: &MonsterRegistry, from: Vec3) -> Option<&MonsterEntity> {
    registry
        .live()
        .min_by(|a, b| {
            from.planar_distance(a.position)
                .total_cmp(&from.planar_distance(b.position))
        })
}

/// Walk the patrol circle unless something is close enough to fight.
pub fn patrol(
    time: Res<Time>,
    tuning: Res<Tuning>,
    ground: Res<Ground>,
    arena: Res<Arena>,
    mut player: ResMut<Player>,
) {
    let engaged = nearest_live(arena.registry(), player.position)
        .is_some_and(|m| player.position.planar_distance(m.position) < ENGAGE_DISTANCE);

    if !engaged {
        let radius = tuning.session.patrol_radius.max(1.0);
        player.patrol_angle += player.speed / radius * time.delta_secs();
        let (sin, cos) = player.patrol_angle.sin_cos();
        let waypoint = player.spawn + Vec3::new(sin, 0.0, cos) * radius;

        let to = (waypoint - player.position).with_y(0.0);
        let step = player.speed * time.delta_secs();
        if to.length() > 1e-3 {
            player.yaw = player.position.yaw_to(waypoint);
            player.position += to.normalize() * step.min(to.length());
        }
    }

    let (x, z) = (player.position.x, player.position.z);
    player.position.y = ground.height(x, z);
}

/// Swing, bolt and nova at whatever is nearest.
pub fn fight(
    real: Res<Time<Real>>,
    tuning: Res<Tuning>,
    mut arena: ResMut<Arena>,
    mut player: ResMut<Player>,
) {
    let Some(target) = nearest_live(arena.registry(), player.position) else {
        return;
    };
    let distance = player.position.planar_distance(target.position);
    if distance >= ENGAGE_DISTANCE {
        return;
    }

    let now = real.elapsed_secs_f64();
    let combat = &tuning.combat;
    let yaw = player.position.yaw_to(target.position);
    let aim = target.hit_center(combat.center_height_factor)
        - (player.position + Vec3::Y * combat.cast_height);
    let pitch = aim.y.atan2(aim.with_y(0.0).length());
    player.yaw = yaw;

    let crowd = arena
        .registry()
        .live()
        .filter(|m| player.position.planar_distance(m.position) < tuning.spells.frost_nova.range)
        .count();

    if distance < combat.melee_range && player.can_swing() {
        player.start_swing();
        let connected = arena.melee(player.position, yaw, combat.melee_range, combat.melee_damage);
        trace!("swing {}", if connected { "connects" } else { "whiffs" });
    }

    if crowd >= NOVA_CROWD && spell_ready(&arena, SpellId::FrostNova) {
        if let Err(e) = arena.cast(SpellId::FrostNova, player.position, yaw, 0.0, now) {
            debug!("nova refused: {e}");
        }
    } else if distance < tuning.spells.frostbolt.range && spell_ready(&arena, SpellId::Frostbolt) {
        if let Err(e) = arena.cast(SpellId::Frostbolt, player.position, yaw, pitch, now) {
            debug!("frostbolt refused: {e}");
        }
    }
}

fn spell_ready(arena: &Arena, spell: SpellId) -> bool {
    arena.spells().spell(spell).is_some_and(|s| s.ready())
}
