use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use panel_core::init::CommandBus;
use panel_core::lifecycle::Panel;
use panel_core::lines::{ALL_LINES, ControlLines, Delay, LINE_COUNT, LineId, LineLevel};
use panel_core::telemetry::{EventSink, PanelEvent};
use panel_core::trigger::{PowerSwitch, TriggerError};

const LOG_PATH: &str = "evidence/emulator-session.log";

pub const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "on",
        "on | 1                 - power the panel and replay the init sequence",
    ),
    (
        "off",
        "off | 0                - blank the display and power the panel down",
    ),
    (
        "status",
        "status                 - display lifecycle state and line levels",
    ),
    (
        "help",
        "help [topic]           - show help for a command",
    ),
];

/// Transport fault injected by the `--fail-at` flag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InjectedFault;

impl fmt::Display for InjectedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("injected transport fault")
    }
}

/// Command bus that records traffic counts and can fail one scripted write.
pub struct EmulatedBus {
    fail_at: Option<usize>,
    attempts: usize,
    sent: Rc<Cell<usize>>,
}

impl EmulatedBus {
    fn new(fail_at: Option<usize>, sent: Rc<Cell<usize>>) -> Self {
        Self {
            fail_at,
            attempts: 0,
            sent,
        }
    }
}

impl CommandBus for EmulatedBus {
    type Error = InjectedFault;

    fn write(&mut self, _: &[u8]) -> Result<(), Self::Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(InjectedFault);
        }
        self.sent.set(self.sent.get() + 1);
        Ok(())
    }
}

/// Delay source that advances a shared virtual counter instead of sleeping.
pub struct VirtualClock {
    now: Rc<Cell<Duration>>,
}

impl Delay for VirtualClock {
    fn hold_for(&mut self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

/// Line driver backed by a shared level table the session can display.
pub struct EmulatedLines {
    levels: Rc<RefCell<[LineLevel; LINE_COUNT]>>,
}

impl ControlLines for EmulatedLines {
    fn set(&mut self, line: LineId, level: LineLevel) {
        self.levels.borrow_mut()[line.as_index()] = level;
    }
}

/// Sink that parks events for the session to narrate after each command.
pub struct SharedSink {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl EventSink for SharedSink {
    fn record(&mut self, event: PanelEvent) {
        self.events.borrow_mut().push(event);
    }
}

pub struct Session {
    panel: Panel<EmulatedLines, EmulatedBus, VirtualClock, SharedSink>,
    clock: Rc<Cell<Duration>>,
    levels: Rc<RefCell<[LineLevel; LINE_COUNT]>>,
    events: Rc<RefCell<Vec<PanelEvent>>>,
    sent: Rc<Cell<usize>>,
    transcript: TranscriptLogger,
}

impl Session {
    pub fn new(fail_at: Option<usize>) -> io::Result<Self> {
        let transcript = TranscriptLogger::new(LOG_PATH)?;
        let clock = Rc::new(Cell::new(Duration::ZERO));
        let levels = Rc::new(RefCell::new([LineLevel::Low; LINE_COUNT]));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sent = Rc::new(Cell::new(0));

        let panel = Panel::with_sink(
            EmulatedLines {
                levels: Rc::clone(&levels),
            },
            EmulatedBus::new(fail_at, Rc::clone(&sent)),
            VirtualClock {
                now: Rc::clone(&clock),
            },
            SharedSink {
                events: Rc::clone(&events),
            },
        );

        Ok(Self {
            panel,
            clock,
            levels,
            events,
            sent,
            transcript,
        })
    }

    pub fn handle_command(&mut self, line: &str) -> io::Result<Vec<String>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let elapsed = self.clock.get();
        self.transcript
            .append_line(elapsed, TranscriptRole::Host, trimmed)?;

        if trimmed.eq_ignore_ascii_case("status") {
            let lines = self.status_lines();
            self.record_output(elapsed, &lines)?;
            return Ok(lines);
        }
        if trimmed.eq_ignore_ascii_case("help") {
            return self.handle_help(None, elapsed);
        }
        if let Some(rest) = trimmed.strip_prefix("help ") {
            return self.handle_help(Some(rest.trim()), elapsed);
        }

        let outcome = PowerSwitch::new(&mut self.panel).write(trimmed);
        let mut lines = Vec::new();
        match outcome {
            Ok(request) => {
                let flag = PowerSwitch::new(&mut self.panel).read();
                lines.push(format!(
                    "OK {} state={} flag={flag}",
                    if request.as_flag() == 1 { "on" } else { "off" },
                    self.panel.state(),
                ));
            }
            Err(TriggerError::Parse(err)) => {
                lines.push(format!("ERR syntax {err}"));
            }
            Err(TriggerError::Enable(err)) => {
                lines.push(format!("ERR enable {err} state={}", self.panel.state()));
            }
            Err(TriggerError::Disable(err)) => {
                lines.push(format!("ERR disable {err} state={}", self.panel.state()));
            }
        }

        for event in self.events.borrow_mut().drain(..) {
            lines.push(format!("  {event}"));
        }

        // Narrate at the post-command virtual time.
        let elapsed = self.clock.get();
        self.record_output(elapsed, &lines)?;
        Ok(lines)
    }

    fn status_lines(&mut self) -> Vec<String> {
        let flag = PowerSwitch::new(&mut self.panel).read();
        let mut lines = vec![format!(
            "state={} flag={flag} elapsed=+{}ms commands-sent={}",
            self.panel.state(),
            self.clock.get().as_millis(),
            self.sent.get(),
        )];
        let levels = self.levels.borrow();
        for info in &ALL_LINES {
            let level = match levels[info.id.as_index()] {
                LineLevel::Low => "low",
                LineLevel::High => "high",
            };
            let active = match info.active_level {
                LineLevel::Low => "active low",
                LineLevel::High => "active high",
            };
            lines.push(format!("  {}={level} ({active})", info.name));
        }
        lines
    }

    fn handle_help(&mut self, topic: Option<&str>, elapsed: Duration) -> io::Result<Vec<String>> {
        let lines = match topic {
            None => {
                let mut lines = vec!["Commands:".to_string()];
                for (_, summary) in HELP_TOPICS {
                    lines.push(format!("  {summary}"));
                }
                lines
            }
            Some(topic) => match HELP_TOPICS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(topic))
            {
                Some((_, summary)) => vec![summary.to_string()],
                None => vec![format!("ERR unknown help topic `{topic}`")],
            },
        };

        self.record_output(elapsed, &lines)?;
        Ok(lines)
    }

    fn record_output(&mut self, elapsed: Duration, lines: &[String]) -> io::Result<()> {
        for line in lines {
            self.transcript
                .append_line(elapsed, TranscriptRole::Emulator, line)?;
        }
        Ok(())
    }
}

struct TranscriptLogger {
    writer: BufWriter<std::fs::File>,
}

impl TranscriptLogger {
    fn new(path: &str) -> io::Result<Self> {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut logger = Self {
            writer: BufWriter::new(file),
        };

        logger.write_header()?;
        Ok(logger)
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.writer, "# BV055HDE panel emulator transcript")?;
        writeln!(
            self.writer,
            "# Timestamps are virtual milliseconds accumulated by panel holds"
        )?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn append_line(
        &mut self,
        elapsed: Duration,
        role: TranscriptRole,
        line: &str,
    ) -> io::Result<()> {
        writeln!(
            self.writer,
            "[+{:>6} ms] {} {}",
            elapsed.as_millis(),
            role.prefix(),
            line
        )?;
        self.writer.flush()
    }
}

enum TranscriptRole {
    Host,
    Emulator,
}

impl TranscriptRole {
    fn prefix(&self) -> &'static str {
        match self {
            TranscriptRole::Host => "HOST>",
            TranscriptRole::Emulator => "EMU <",
        }
    }
}
