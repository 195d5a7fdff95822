use combat_content::builtin_modifiers;
use combat_core::{
    ActorId, ActorKind, CardDescriptor, CardType, CombatActor, DamageType, EventContext,
    EventDispatcher, EventType, FixedRoll, StackKind, StatusEffectKind, StatusLedger,
    StatusManager,
};

fn dispatcher(roll: f64) -> EventDispatcher {
    let catalog = builtin_modifiers().unwrap();
    EventDispatcher::new(catalog.into_registry()).with_rng(FixedRoll(roll))
}

#[test]
fn lingering_wounds_bleeds_on_lucky_physical_hit() {
    let target = ActorId::enemy(0);
    let mut status = StatusLedger::new().with_actors([ActorId::PLAYER, target]);
    let mut player = CombatActor::player(50.0, 3.0).with_unlocks(["Lingering Wounds_2"]);

    let mut ctx = EventContext::new()
        .with_target(target, ActorKind::Minion)
        .with_damage(20.0, DamageType::Physical);
    let report = dispatcher(10.0).process_event(
        EventType::OnDamageDealt,
        &mut ctx,
        &mut player,
        &mut status,
    );
    assert!(report.is_clean(), "{:?}", report.failures);
    assert_eq!(status.total_magnitude(target, StatusEffectKind::Bleed), 5.0);

    let mut ctx = EventContext::new()
        .with_target(target, ActorKind::Minion)
        .with_damage(20.0, DamageType::Physical);
    dispatcher(90.0).process_event(EventType::OnDamageDealt, &mut ctx, &mut player, &mut status);
    assert_eq!(status.total_magnitude(target, StatusEffectKind::Bleed), 5.0);
}

#[test]
fn executioner_skips_minions() {
    let mut status = StatusLedger::new();
    let mut player = CombatActor::player(50.0, 3.0).with_unlocks(["Executioner"]);
    let strike =
        CardDescriptor::new("Strike", CardType::Attack, DamageType::Physical).with_damage(6.0);
    let mut dispatcher = dispatcher(50.0);

    let mut vs_minion =
        EventContext::for_card(strike.clone()).with_target(ActorId::enemy(0), ActorKind::Minion);
    dispatcher.process_event(EventType::OnCardPlayed, &mut vs_minion, &mut player, &mut status);
    assert!(vs_minion.more_damage.is_empty());

    let mut vs_boss =
        EventContext::for_card(strike).with_target(ActorId::enemy(1), ActorKind::Boss);
    dispatcher.process_event(EventType::OnCardPlayed, &mut vs_boss, &mut player, &mut status);
    assert_eq!(vs_boss.more_damage, vec![0.3]);
}

#[test]
fn war_echo_requests_echo_and_draw() {
    let mut status = StatusLedger::new();
    let mut player = CombatActor::player(50.0, 3.0).with_unlocks(["War Echo"]);
    let mut ctx = EventContext::new();

    let report = dispatcher(50.0).process_event(
        EventType::OnEnemyKilled,
        &mut ctx,
        &mut player,
        &mut status,
    );

    assert_eq!(report.effects_fired, 1);
    assert_eq!(ctx.cards_to_draw, 1);
    assert_eq!(ctx.echoes.len(), 1);
    assert_eq!(ctx.echoes[0].tag, "echo");
}

#[test]
fn corrupting_touch_leaves_target_vulnerable_at_cap() {
    let target = ActorId::enemy(0);
    let mut status = StatusLedger::new().with_actors([ActorId::PLAYER, target]);
    let mut player = CombatActor::player(50.0, 3.0).with_unlocks(["Corrupting Touch"]);
    let mut dispatcher = dispatcher(50.0);
    let blight = CardDescriptor::new("Blight", CardType::Skill, DamageType::Chaos);

    for _ in 0..5 {
        let mut ctx = EventContext::for_card(blight.clone()).with_target(target, ActorKind::Elite);
        let report =
            dispatcher.process_event(EventType::OnCardPlayed, &mut ctx, &mut player, &mut status);
        assert!(report.is_clean(), "{:?}", report.failures);
    }

    assert_eq!(player.stacks.get_stacks(StackKind::Corruption), 0);
    assert_eq!(status.total_magnitude(target, StatusEffectKind::Vulnerable), 25.0);
    assert_eq!(player.health.current, 50.0);
}
