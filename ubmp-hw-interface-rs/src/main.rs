//! ubmp-hw-interface
//!
//! Push-button buzzer demo for the Raspberry Pi Pico 2, wiring the
//! `buzzer-tones` player to a piezo and five buttons:
//!
//! 1. The player boots, beeps twice and waits for a button.
//! 2. SW2 plays the next built-in song; SW1 held during a song stops it
//!    between notes (the same song starts over on the next press).
//! 3. SW3 and SW4 play a Morse dot and dash.
//! 4. SW5 plays a C major chord at the current octave.
//!
//! Playback blocks the executor for the length of each sound, which is fine
//! with a single task.
//!
//! # Wiring
//!
//! | Signal  | Pico 2 Pin | Notes                       |
//! |---------|------------|-----------------------------|
//! | BEEPER  | GP14       | Piezo to ground             |
//! | SW1     | GP1        | Stop, active-low, pull-up   |
//! | SW2     | GP2        | Song, active-low, pull-up   |
//! | SW3     | GP3        | Dot, active-low, pull-up    |
//! | SW4     | GP4        | Dash, active-low, pull-up   |
//! | SW5     | GP5        | Chord, active-low, pull-up  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use buzzer_tones::{
    note, NoteLength, PackedNote, PinBuzzer, Pitch, Player, SongStatus, SynthConfig,
    DEFAULT_PLAYLIST, DEFAULT_UNIT_NS,
};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Constants and type aliases
// ---------------------------------------------------------------------------

/// Button scan interval, also the debounce time.
const POLL_MS: u64 = 10;

/// Start-up beep: two short chirps.
const READY_BEEP_CYCLES: u32 = 200;
const READY_BEEP_PERIOD: u32 = 60;
const READY_BEEP_TIMES: u32 = 2;

const C_MAJOR: [PackedNote; 3] = [
    note(Pitch::C, NoteLength::Full),
    note(Pitch::E, NoteLength::Full),
    note(Pitch::G, NoteLength::Full),
];

type Buzzer = PinBuzzer<Output<'static>, Delay>;

struct Buttons {
    stop: Input<'static>,
    song: Input<'static>,
    dot: Input<'static>,
    dash: Input<'static>,
    chord: Input<'static>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Block until `button` is let go, so one press plays one sound.
async fn released(button: &Input<'static>) {
    while button.is_low() {
        Timer::after_millis(POLL_MS).await;
    }
}

/// Polls the buttons and plays whatever was pressed.
#[embassy_executor::task]
async fn buzzer_task(mut player: Player<'static, Buzzer>, buttons: Buttons) {
    info!("Buzzer task started");

    if let Err(_) = player.beep(READY_BEEP_CYCLES, READY_BEEP_PERIOD, READY_BEEP_TIMES) {
        warn!("Ready beep failed");
    }

    loop {
        if buttons.song.is_low() {
            match player.play_song_until(|| buttons.stop.is_low()) {
                Ok(SongStatus::Finished { index, notes }) => {
                    info!("Song {} done ({} notes), octave {}", index, notes, player.octave())
                }
                Ok(SongStatus::Cancelled { index, notes }) => {
                    info!("Song {} stopped after {} notes", index, notes);
                    released(&buttons.stop).await;
                }
                Err(_) => error!("Song playback failed"),
            }
            released(&buttons.song).await;
        } else if buttons.dot.is_low() {
            if let Err(_) = player.morse_dot() {
                error!("Dot failed");
            }
            released(&buttons.dot).await;
        } else if buttons.dash.is_low() {
            if let Err(_) = player.morse_dash() {
                error!("Dash failed");
            }
            released(&buttons.dash).await;
        } else if buttons.chord.is_low() {
            match player.play_chord(&C_MAJOR) {
                Ok(slices) => debug!("Chord: {} slices", slices),
                Err(_) => error!("Chord failed"),
            }
            released(&buttons.chord).await;
        }

        Timer::after_millis(POLL_MS).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("ubmp-hw-interface starting");

    // Piezo starts low; the player only ever toggles it.
    let beeper = Output::new(p.PIN_14, Level::Low);
    let buzzer = PinBuzzer::new(beeper, Delay, DEFAULT_UNIT_NS);

    let buttons = Buttons {
        stop: Input::new(p.PIN_1, Pull::Up),
        song: Input::new(p.PIN_2, Pull::Up),
        dot: Input::new(p.PIN_3, Pull::Up),
        dash: Input::new(p.PIN_4, Pull::Up),
        chord: Input::new(p.PIN_5, Pull::Up),
    };

    let config = SynthConfig::default();
    info!(
        "Octave {}, eighth note {} units, {} songs",
        config.default_octave,
        config.eighth_note_cycles,
        DEFAULT_PLAYLIST.len()
    );
    let player = Player::new(buzzer, config, DEFAULT_PLAYLIST);

    spawner.spawn(buzzer_task(player, buttons).unwrap());

    info!("All tasks spawned");
}
