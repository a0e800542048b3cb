use glyph_rain::sim::{FULL_ALPHA, RESTART_SPEED};
use glyph_rain::world::GLYPH_HEIGHT;
use glyph_rain::{Config, Entity, Poem, RainWorld, State, STRIDE};

#[test]
fn no_frames_no_glyphs() {
    let world = RainWorld::new(800, 600);
    assert!(world.entities().is_empty());
}

#[test]
fn lone_drop_lands_on_ground_on_schedule() {
    let mut world = RainWorld::new(800, 600);
    let ground = world.layout().ground_y();
    world.insert(Entity::falling(0.0, 100.0, -50.0, 'f', 8.0, 30.0));

    let steps = ((ground + 50.0) / 8.0).ceil() as usize;
    for step in 0..steps {
        assert!(world.entities()[0].is_falling(), "landed early at step {step}");
        world.set_wind(0.0);
        world.advance_falling();
    }

    let e = &world.entities()[0];
    assert_eq!(e.state, State::Stacked);
    assert_eq!(e.y, ground);
    assert_eq!(e.speed, 0.0);
}

#[test]
fn pile_collapses_when_base_goes() {
    let mut world = RainWorld::new(800, 600);
    let ground = world.layout().ground_y();
    world.insert(Entity::stacked(100.0, ground, 'f', 1.0));
    world.insert(Entity::stacked(100.0, ground - GLYPH_HEIGHT, 'a', 1.0));

    world.settle_stacked();
    assert!(world.entities().iter().all(Entity::is_stacked));

    // Simulate the base fading out completely
    world.entities_mut().retain(|e| e.glyph != 'f');
    world.settle_stacked();

    let top = &world.entities()[0];
    assert_eq!(top.state, State::Falling);
    assert_eq!(top.speed, RESTART_SPEED);
}

#[test]
fn faded_glyph_gone_after_step() {
    let mut world = RainWorld::new(800, 600);
    let ground = world.layout().ground_y();
    let mut e = Entity::stacked(100.0, ground, 'g', 2.0);
    e.alpha = 1.5;
    world.insert(e);

    let removed = world.settle_stacked();

    assert_eq!(removed, 1);
    assert!(world.entities().is_empty());
}

#[test]
fn spawns_spell_the_word_in_order() {
    let mut world = RainWorld::new(800, 600);
    for _ in 0..16 {
        world.spawn_now();
    }
    let spelled: String = world.entities().iter().map(|e| e.glyph).collect();
    assert_eq!(spelled, "fallingfallingfa");
}

#[test]
fn custom_word_cycles_too() {
    let config = Config::from_json(r#"{ "word": "rain" }"#).unwrap();
    let mut world = RainWorld::with_config(800, 600, &config);
    for _ in 0..6 {
        world.spawn_now();
    }
    let spelled: String = world.entities().iter().map(|e| e.glyph).collect();
    assert_eq!(spelled, "rainra");
}

#[test]
fn long_run_keeps_invariants() {
    let mut world = RainWorld::new(1024, 768);
    let ground = world.layout().ground_y();

    for _ in 0..5000 {
        world.tick();
        for e in world.entities() {
            match e.state {
                State::Falling => assert!(e.speed > 0.0),
                State::Stacked => {
                    assert!(e.alpha > 0.0 && e.alpha <= FULL_ALPHA);
                    assert!(e.y <= ground);
                }
            }
        }
    }
}

#[test]
fn rain_reaches_a_steady_state() {
    // Spawning and fading balance out instead of growing without bound
    let mut world = RainWorld::new(800, 600);
    let mut peak = 0;
    for frame in 0..6000 {
        world.tick();
        world.drain_cues().for_each(drop);
        if frame > 3000 {
            peak = peak.max(world.entities().len());
        }
    }
    assert!(peak > 0 && peak < 200, "peak {peak}");
}

#[test]
fn poem_packs_every_glyph() {
    let mut poem = Poem::new(800, 600);
    for _ in 0..300 {
        poem.tick();
    }
    assert_eq!(poem.output().len(), poem.entity_count() * STRIDE);

    for (chunk, e) in poem.output().chunks_exact(STRIDE).zip(poem.world().entities()) {
        assert_eq!(chunk[0], e.x);
        assert_eq!(chunk[1], e.y);
        assert_eq!(chunk[7] as u32, e.glyph as u32);
        if e.is_falling() {
            assert_eq!(chunk[2], 0.0);
            assert_eq!(chunk[3], FULL_ALPHA);
        } else {
            assert_eq!(chunk[2], 1.0);
        }
    }
}

#[test]
fn poem_cues_come_in_triples() {
    let mut poem = Poem::new(800, 600);
    let mut total = 0;
    for _ in 0..3000 {
        poem.tick();
        let cues = poem.take_cues();
        assert_eq!(cues.len() % 3, 0);
        for cue in cues.chunks_exact(3) {
            assert!(cue[0] > 700.0 && cue[0] < 1600.0);
            assert!(cue[2] >= 0.1 && cue[2] < 0.4);
        }
        total += cues.len() / 3;
    }
    assert!(total > 0, "piles should ring at least once");
}
