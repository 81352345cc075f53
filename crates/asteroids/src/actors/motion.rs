//! Motion shared by every moving actor: integration and the boundary rule

use arcade_engine::physics::WrapOutcome;

use super::{ActorCore, UpdateContext};
use crate::error::ActorError;

/// Integrate one tick of motion, failing if the state stops being finite
pub fn step(core: &mut ActorCore, ctx: &UpdateContext<'_>, kind: &'static str) -> Result<(), ActorError> {
    core.body.integrate(ctx.dt_ms, ctx.config.physics.velocity_mult);
    if core.body.is_finite() {
        Ok(())
    } else {
        Err(ActorError::NonFinite { kind })
    }
}

/// Apply the boundary rule after integration
///
/// An actor that has never been on screen is marked spawned once its bounds
/// touch the viewport; until then it is only destroyed when it is outside
/// and `ttl_expired`. A spawned actor leaving the screen wraps to the
/// opposite edge, or is destroyed when it wraps again within the guard
/// window.
pub fn enforce_bounds(core: &mut ActorCore, ctx: &UpdateContext<'_>, ttl_expired: bool) {
    let bounds = core.bounds();

    if !core.spawned {
        if ctx.wrap.is_inside(&bounds) {
            core.spawned = true;
        } else if ttl_expired {
            log::debug!("{:?} actor expired before reaching the screen", core.layer());
            core.kill();
        }
        return;
    }

    match ctx.wrap.wrap(&bounds, core.body.position, core.last_teleport_ms, ctx.now_ms) {
        WrapOutcome::Inside => {}
        WrapOutcome::Wrapped(target) => {
            log::trace!(
                "teleport ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                core.body.position.x,
                core.body.position.y,
                target.x,
                target.y
            );
            core.body.position = target;
            core.last_teleport_ms = Some(ctx.now_ms);
        }
        WrapOutcome::Stuck => {
            log::debug!("{:?} actor stuck on the screen edge, removing", core.layer());
            core.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::foundation::math::Vec2;
    use arcade_engine::physics::Body;

    use crate::actors::testing::Fixture;
    use crate::config::GameConfig;
    use crate::layer::Layer;

    fn core_at(config: &GameConfig, position: Vec2) -> ActorCore {
        ActorCore::new(config, Layer::Asteroids, "meteorGrey_small1", 1.0, 1.0, Body::new(position)).unwrap()
    }

    #[test]
    fn test_unspawned_marked_on_entry() {
        let mut fixture = Fixture::new();
        let mut core = core_at(&fixture.config, Vec2::new(100.0, 100.0));
        enforce_bounds(&mut core, &fixture.ctx(16.0), false);
        assert!(core.spawned);
    }

    #[test]
    fn test_unspawned_outside_survives_until_ttl() {
        let mut fixture = Fixture::new();
        let mut core = core_at(&fixture.config, Vec2::new(-50.0, 100.0));
        enforce_bounds(&mut core, &fixture.ctx(16.0), false);
        assert!(!core.spawned);
        assert!(!core.is_removed());

        enforce_bounds(&mut core, &fixture.ctx(16.0), true);
        assert!(core.is_removed());
    }

    #[test]
    fn test_spawned_wraps_instead_of_dying() {
        let mut fixture = Fixture::new();
        fixture.now_ms = 484.0;
        let mut core = core_at(&fixture.config, Vec2::new(1300.0, 250.0));
        core.spawned = true;
        enforce_bounds(&mut core, &fixture.ctx(16.0), true);
        assert!(!core.is_removed());
        assert_eq!(core.body.position, Vec2::new(2.0, 250.0));
        assert_eq!(core.last_teleport_ms, Some(500.0));
        assert!(fixture.wrap.is_inside(&core.bounds()));
    }

    #[test]
    fn test_second_teleport_inside_guard_is_stuck() {
        let mut fixture = Fixture::new();
        fixture.now_ms = 484.0;
        let mut core = core_at(&fixture.config, Vec2::new(1300.0, 250.0));
        core.spawned = true;
        core.last_teleport_ms = Some(450.0);
        enforce_bounds(&mut core, &fixture.ctx(16.0), false);
        assert!(core.is_removed());
    }

    #[test]
    fn test_non_finite_step_fails() {
        let mut fixture = Fixture::new();
        let mut core = core_at(&fixture.config, Vec2::new(10.0, 10.0));
        core.body.velocity.x = f32::INFINITY;
        let result = step(&mut core, &fixture.ctx(16.0), "asteroid");
        assert!(matches!(result, Err(ActorError::NonFinite { kind: "asteroid" })));
    }
}
