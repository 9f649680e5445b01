use std::io::{self, BufRead, Write};
use std::thread;

use colored::Colorize;
use crossbeam_channel::{never, select, tick, unbounded, Receiver, RecvError};
use log::{debug, info, warn};
use x360ctrl::{ControllerEvent, StateProvider, XInputController};

use crate::config::Settings;
use crate::error::DemoError;
use crate::simulated::SimulatedProvider;

const EXIT_KEY: char = 'x';

type Controller = XInputController<Box<dyn StateProvider>>;

#[cfg(feature = "sdl2-backend")]
fn hardware_provider() -> Result<Box<dyn StateProvider>, DemoError> {
    Ok(Box::new(x360ctrl::Sdl2Provider::new()?))
}

#[cfg(not(feature = "sdl2-backend"))]
fn hardware_provider() -> Result<Box<dyn StateProvider>, DemoError> {
    Err(DemoError::NoBackend)
}

/// Forwards the first character of every stdin line.
fn spawn_key_reader() -> Receiver<char> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(key) = line.trim().chars().next() {
                if tx.send(key).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

fn render(out: &mut impl Write, controller: &Controller, updated: Option<bool>) -> io::Result<()> {
    // Clear screen and move the cursor home.
    write!(out, "\x1B[2J\x1B[1;1H")?;
    writeln!(out, "Press {EXIT_KEY} and Enter to exit")?;
    if updated == Some(false) {
        writeln!(out, "{}", "Controller update failed".bright_red())?;
    }
    write!(out, "{controller}")?;
    out.flush()
}

enum Input {
    Stop,
    Key(Result<char, RecvError>),
    Idle,
}

/// Applies a key read from stdin. Returns `true` when the loop should stop.
fn handle_key(key: Result<char, RecvError>, keys: &mut Receiver<char>) -> bool {
    match key {
        Ok(EXIT_KEY) => true,
        Ok(_) => false,
        Err(_) => {
            // stdin closed, keep running until Ctrl+C
            *keys = never();
            false
        }
    }
}

pub(crate) fn run(settings: Settings) -> Result<(), DemoError> {
    let provider = if settings.simulate {
        info!("Using simulated controller");
        Box::new(SimulatedProvider::new()) as Box<dyn StateProvider>
    } else {
        hardware_provider()?
    };

    let controller: Controller =
        XInputController::with_config(settings.index, provider, settings.poller);
    if !controller.is_connected() {
        return Err(DemoError::NotConnected(settings.index));
    }
    info!(
        "Polling controller {} every {:?}",
        settings.index,
        settings.poller.interval
    );
    controller.on_button_pressed(|e| {
        debug!("Pressed {:?}", e.buttons);
    });

    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;
    let mut keys = spawn_key_reader();
    let mut out = io::stdout().lock();

    if settings.auto {
        let events = controller.subscribe();
        controller.start_auto_update()?;
        render(&mut out, &controller, None)?;
        loop {
            let input = select! {
                recv(stop_rx) -> _ => Input::Stop,
                recv(keys) -> key => Input::Key(key),
                recv(events) -> event => {
                    if let Ok(ControllerEvent::Updated) = event {
                        render(&mut out, &controller, None)?;
                    }
                    Input::Idle
                }
            };
            match input {
                Input::Stop => break,
                Input::Key(key) => {
                    if handle_key(key, &mut keys) {
                        break;
                    }
                }
                Input::Idle => {}
            }
        }
        controller.stop_auto_update();
    } else {
        let ticker = tick(settings.poller.interval);
        loop {
            let updated = controller.update();
            render(&mut out, &controller, Some(updated))?;
            let input = select! {
                recv(stop_rx) -> _ => Input::Stop,
                recv(keys) -> key => Input::Key(key),
                recv(ticker) -> _ => Input::Idle,
            };
            match input {
                Input::Stop => break,
                Input::Key(key) => {
                    if handle_key(key, &mut keys) {
                        break;
                    }
                }
                Input::Idle => {}
            }
        }
    }

    if !controller.is_connected() {
        warn!("Controller {} is disconnected", settings.index);
    }
    info!("Stopped");
    Ok(())
}
