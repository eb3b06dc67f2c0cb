use std::io::{self, ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

const CTRL_C: u8 = 0x03;

/// What a single key press asks of the game loop. Every key wakes the loop,
/// recognised or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    Quit,
    Wake,
}

impl Intent {
    pub fn from_key(key: u8) -> Self {
        match key {
            b'h' => Intent::Turn(Left),
            b'j' => Intent::Turn(Down),
            b'k' => Intent::Turn(Up),
            b'l' => Intent::Turn(Right),
            b'q' | CTRL_C => Intent::Quit,
            _ => Intent::Wake,
        }
    }
}

/// Somewhere key bytes come from. `Ok(None)` means nothing arrived in time
/// and the caller should check back; errors end the listener.
pub trait KeySource: Send {
    fn next_key(&mut self) -> io::Result<Option<u8>>;
}

/// Blocking, byte-at-a-time reader over any stream. It can only notice a
/// shutdown between bytes.
pub struct ByteKeys<R> {
    reader: R,
}

impl<R: Read> ByteKeys<R> {
    pub fn new(reader: R) -> Self {
        ByteKeys { reader }
    }
}

impl<R: Read + Send> KeySource for ByteKeys<R> {
    fn next_key(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed")),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Key presses from the terminal through crossterm. Polls so a shutdown is
/// noticed within one poll interval.
pub struct TerminalKeys {
    poll_interval: Duration,
}

impl TerminalKeys {
    pub fn new(poll_interval: Duration) -> Self {
        TerminalKeys { poll_interval }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<u8>> {
        if !event::poll(self.poll_interval)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(ev) if ev.kind != KeyEventKind::Release => Ok(key_byte(&ev)),
            _ => Ok(None),
        }
    }
}

fn key_byte(ev: &KeyEvent) -> Option<u8> {
    match ev {
        ev if is_ctrl_c(ev) => Some(CTRL_C),
        KeyEvent { code: KeyCode::Char(c), .. } if c.is_ascii() => Some(*c as u8),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. })
}

/// Turns key bytes into intents for the scheduler. Never touches game state.
pub struct InputListener<K> {
    source: K,
    intents: Sender<Intent>,
    shutdown: Arc<AtomicBool>,
}

impl<K: KeySource> InputListener<K> {
    pub fn new(source: K, intents: Sender<Intent>, shutdown: Arc<AtomicBool>) -> Self {
        InputListener { source, intents, shutdown }
    }

    /// Runs until quit, shutdown, a read failure, or the receiving side going
    /// away. A failed read is reported as a quit.
    pub fn run(mut self) {
        while !self.shutdown.load(Ordering::Relaxed) {
            let key = match self.source.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("input read failed, quitting: {}", e);
                    let _ = self.intents.send(Intent::Quit);
                    return;
                },
            };

            let intent = Intent::from_key(key);
            if self.intents.send(intent).is_err() || intent == Intent::Quit {
                return;
            }
        }

        log::debug!("input listener shut down");
    }
}

impl<K: KeySource + 'static> InputListener<K> {
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}
