use super::{DamageOutcome, DamageReceiver, Health};

#[test]
fn damage_reduces_health() {
    let mut health = Health::new(5);
    assert_eq!(health.add_damage(2), DamageOutcome::Hurt { remaining: 3 });
    assert_eq!(health.current, 3);
}

#[test]
fn lethal_damage_depletes_once() {
    let mut health = Health::new(3);
    assert_eq!(health.add_damage(10), DamageOutcome::Depleted);
    assert!(health.is_dead());
    assert_eq!(health.current, 0);
    assert_eq!(health.add_damage(1), DamageOutcome::Ignored);
}

#[test]
fn invincibility_ignores_damage() {
    let mut health = Health::new(4);
    health.set_invincible(true);
    assert_eq!(health.add_damage(3), DamageOutcome::Ignored);
    assert_eq!(health.current, 4);

    health.set_invincible(false);
    assert_eq!(health.add_damage(3), DamageOutcome::Hurt { remaining: 1 });
}

#[test]
fn zero_damage_is_ignored() {
    let mut health = Health::new(2);
    assert_eq!(health.add_damage(0), DamageOutcome::Ignored);
}

#[test]
fn restore_refills_and_clears_invincibility() {
    let mut health = Health::new(3);
    health.add_damage(3);
    health.set_invincible(true);
    health.restore();
    assert_eq!(health.current, 3);
    assert!(!health.is_invincible());
    assert!(!health.is_dead());
}

#[test]
fn receivers_work_through_the_trait() {
    fn hit(receiver: &mut dyn DamageReceiver, amount: u32) -> DamageOutcome {
        receiver.add_damage(amount)
    }
    let mut health = Health::new(2);
    assert_eq!(hit(&mut health, 1), DamageOutcome::Hurt { remaining: 1 });
    assert_eq!(hit(&mut health, 1), DamageOutcome::Depleted);
}
