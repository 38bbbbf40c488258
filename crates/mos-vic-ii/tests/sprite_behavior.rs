//! Sprite DMA, collisions, the sprite crunch and the lightpen latch.

mod common;

use common::{make_vic, run_to_cycle, run_to_line};

#[test]
fn sprite_dma_switches_on_at_matching_line() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40; // sprite 0 data at $1000
    vic.write(0x15, 0x01);
    vic.write(0x00, 100);
    vic.write(0x01, 100);

    run_to_line(&mut vic, &bus, 100);
    assert!(!vic.sprite_dma(0));
    run_to_cycle(&mut vic, &bus, 56);
    assert!(vic.sprite_dma(0), "DMA on after the cycle 55 check");
    assert_eq!(vic.sprite_mcbase(0), 0);

    // 21 rows of three bytes exhaust the data counter; DMA drops again.
    run_to_line(&mut vic, &bus, 122);
    run_to_cycle(&mut vic, &bus, 17);
    assert!(!vic.sprite_dma(0));
}

#[test]
fn sprite_ba_asserts_three_cycles_before_its_fetch() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40;
    vic.write(0x15, 0x01);
    vic.write(0x00, 100);
    vic.write(0x01, 100);

    run_to_line(&mut vic, &bus, 100);
    run_to_cycle(&mut vic, &bus, 55);
    assert!(!vic.ba_low());
    vic.tick(&bus); // cycle 55: DMA check and BA window start
    assert!(vic.ba_low(), "sprite 0 pulls BA from cycle 55");

    run_to_cycle(&mut vic, &bus, 60);
    assert!(vic.ba_low(), "held through the data fetches");
    vic.tick(&bus);
    assert!(!vic.ba_low(), "released after cycle 59");
}

#[test]
fn overlapping_sprites_collide_and_interrupt_once() {
    let (mut vic, mut bus) = make_vic();
    // Sprites 0 and 1 at the same spot, sharing the same pattern with the
    // leftmost pixel of every row set.
    bus.ram[0x03F8] = 0x40;
    bus.ram[0x03F9] = 0x40;
    for i in 0..63 {
        bus.ram[0x1000 + i] = 0x80;
    }
    vic.write(0x15, 0x03);
    vic.write(0x00, 100);
    vic.write(0x01, 100);
    vic.write(0x02, 100);
    vic.write(0x03, 100);
    vic.write(0x27, 0x01);
    vic.write(0x28, 0x02);
    vic.write(0x1A, 0x04);

    // The first data row is fetched at the end of line 100 and crosses the
    // beam at X=100 on the following line.
    run_to_line(&mut vic, &bus, 102);
    assert!(vic.irq(), "sprite-sprite collision interrupt");
    assert_eq!(vic.read(0x1E), 0x03, "sprites 0 and 1 collided");
    assert_eq!(vic.read(0x1E), 0x00, "cleared by the read");
    assert!(vic.irq(), "the latch outlives the register read");
    vic.write(0x19, 0x04);
    assert!(!vic.irq());

    // Still colliding on the next rows, but the interrupt only fires on
    // the 0 -> nonzero transition of the register.
    run_to_line(&mut vic, &bus, 104);
    assert_ne!(vic.peek(0x1E) & 0x03, 0x00);
    assert!(vic.irq(), "register went 0 -> nonzero again after the read");
}

#[test]
fn sprite_over_foreground_sets_background_collision() {
    let (mut vic, mut bus) = make_vic();
    bus.ram.fill(0xFF); // every character pattern is solid foreground
    bus.ram[0x03F8 & 0x3FFF] = 0x40;
    bus.ram[0x1000] = 0x80;
    bus.ram[0x1001] = 0x00;
    bus.ram[0x1002] = 0x00;
    for i in 0..1024 {
        bus.color_ram[i] = 0x01;
    }
    vic.write(0x11, 0x1B); // display on before line $30
    vic.write(0x15, 0x01);
    vic.write(0x00, 100);
    vic.write(0x01, 100);
    vic.write(0x27, 0x05);
    vic.write(0x1A, 0x02);

    run_to_line(&mut vic, &bus, 102);
    assert_ne!(vic.read(0x1F) & 0x01, 0x00, "sprite 0 over foreground");
    assert_eq!(vic.read(0x1F) & 0x01, 0x00, "cleared by the read");
    assert!(vic.irq());
}

#[test]
fn priority_bit_hides_sprite_but_keeps_collision() {
    let (mut vic, mut bus) = make_vic();
    bus.ram.fill(0xFF);
    bus.ram[0x03F8 & 0x3FFF] = 0x40;
    bus.ram[0x1000] = 0x80;
    bus.ram[0x1001] = 0x00;
    bus.ram[0x1002] = 0x00;
    for i in 0..1024 {
        bus.color_ram[i] = 0x01;
    }
    vic.write(0x11, 0x1B);
    vic.write(0x15, 0x01);
    vic.write(0x1B, 0x01); // sprite 0 behind foreground
    vic.write(0x00, 100);
    vic.write(0x01, 100);
    vic.write(0x27, 0x05);

    run_to_line(&mut vic, &bus, 102);
    assert_ne!(
        vic.read(0x1F) & 0x01,
        0x00,
        "suppressed sprites still collide"
    );
}

#[test]
fn sprite_crunch_applies_the_mc_formula() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40;
    vic.write(0x15, 0x01);
    vic.write(0x00, 100);
    vic.write(0x01, 100);

    // Let the sprite DMA run for a few lines.
    run_to_line(&mut vic, &bus, 106);
    assert!(vic.sprite_dma(0));

    run_to_cycle(&mut vic, &bus, 14);
    vic.write(0x17, 0x01); // y-expand on in cycle 14
    vic.tick(&bus);
    assert_eq!(vic.raster_cycle(), 15);
    vic.write(0x17, 0x00); // and off again in cycle 15: crunch
    vic.tick(&bus);

    let mc = vic.sprite_mc(0);
    let mcbase = vic.sprite_mcbase(0);
    let expected = (0x2A & mcbase & mc) | (0x15 & (mcbase | mc));
    vic.tick(&bus); // cycle 16 applies the crunch
    assert_eq!(vic.sprite_mc(0), expected);
    assert_eq!(vic.sprite_mcbase(0), mcbase, "crunch skips the MCBASE reload");
}

#[test]
fn y_expansion_halves_the_data_rate() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40;
    vic.write(0x15, 0x01);
    vic.write(0x17, 0x01); // sprite 0 y-expanded
    vic.write(0x00, 100);
    vic.write(0x01, 100);

    // MCBASE only advances every other line: the same row is fetched and
    // shown twice before the counter base moves on.
    run_to_line(&mut vic, &bus, 102);
    run_to_cycle(&mut vic, &bus, 17);
    let first = vic.sprite_mcbase(0);
    run_to_line(&mut vic, &bus, 103);
    run_to_cycle(&mut vic, &bus, 17);
    assert_eq!(
        vic.sprite_mcbase(0),
        first,
        "expanded sprite repeats each row over two lines"
    );

    run_to_line(&mut vic, &bus, 104);
    run_to_cycle(&mut vic, &bus, 17);
    assert_eq!(vic.sprite_mcbase(0), first + 3, "then moves on");
}

#[test]
fn lightpen_latches_once_per_frame() {
    let (mut vic, bus) = make_vic();
    vic.write(0x1A, 0x08);

    run_to_line(&mut vic, &bus, 40);
    vic.trigger_lightpen();
    assert!(vic.irq());
    let (lpx, lpy) = (vic.read(0x13), vic.read(0x14));
    assert_eq!(lpy, 40);

    vic.write(0x19, 0x08);
    run_to_line(&mut vic, &bus, 80);
    vic.trigger_lightpen();
    assert!(!vic.irq(), "second trigger in the same frame is ignored");
    assert_eq!(vic.read(0x13), lpx);
    assert_eq!(vic.read(0x14), lpy, "coordinates stay latched");

    // The latch re-arms at the start of the next frame.
    run_to_line(&mut vic, &bus, 40);
    vic.trigger_lightpen();
    assert!(vic.irq());
}

#[test]
fn hidden_sprites_still_collide() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40;
    bus.ram[0x03F9] = 0x40;
    bus.ram[0x1000] = 0x80;
    vic.write(0x15, 0x03);
    vic.write(0x00, 100);
    vic.write(0x01, 100);
    vic.write(0x02, 100);
    vic.write(0x03, 100);
    vic.set_hide_sprites(true);

    run_to_line(&mut vic, &bus, 102);
    assert_eq!(vic.read(0x1E), 0x03);
}

#[test]
fn collision_check_masks_gate_detection() {
    let (mut vic, mut bus) = make_vic();
    bus.ram[0x03F8] = 0x40;
    bus.ram[0x03F9] = 0x40;
    bus.ram[0x1000] = 0x80;
    vic.write(0x15, 0x03);
    vic.write(0x00, 100);
    vic.write(0x01, 100);
    vic.write(0x02, 100);
    vic.write(0x03, 100);
    vic.set_sprite_sprite_collision_mask(0x00);

    run_to_line(&mut vic, &bus, 102);
    assert_eq!(vic.read(0x1E), 0x00, "checking disabled for all sprites");
}
