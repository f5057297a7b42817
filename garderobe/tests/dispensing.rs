//! End-to-end dispensing against a file-backed state and a recording printer

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use garderobe::core::{Config, InputError, StateStore};
use garderobe::input::{InputSignal, TriggerSource};
use garderobe::{Dispatcher, TicketPrinter, TicketRenderer};
use garderobe_printer::{Connector, CutMode, PrintResult, Printer};
use tempfile::TempDir;

type Jobs = Rc<RefCell<Vec<Vec<u8>>>>;

struct RecordingConnector {
    jobs: Jobs,
}

struct RecordingPrinter {
    jobs: Jobs,
}

impl Connector for RecordingConnector {
    type Output = RecordingPrinter;

    async fn connect(&self) -> PrintResult<RecordingPrinter> {
        Ok(RecordingPrinter {
            jobs: self.jobs.clone(),
        })
    }
}

impl Printer for RecordingPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        self.jobs.borrow_mut().push(data.to_vec());
        Ok(())
    }
}

/// Presses a key `presses` times, then reports the device as gone
struct Pedal {
    events: VecDeque<InputSignal>,
}

impl Pedal {
    fn pressed(presses: usize) -> Self {
        let events = (0..presses)
            .flat_map(|_| [InputSignal::KeyPress, InputSignal::Other, InputSignal::KeyRelease])
            .collect();
        Self { events }
    }
}

impl TriggerSource for Pedal {
    async fn next_signal(&mut self) -> io::Result<InputSignal> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "pedal unplugged"))
    }
}

fn dispatcher(dir: &TempDir, config: &Config, jobs: &Jobs) -> Dispatcher<RecordingConnector> {
    let state = StateStore::load(dir.path().join("state.json"), config);
    let printer = TicketPrinter::new(
        RecordingConnector { jobs: jobs.clone() },
        TicketRenderer::new(48, config.header.clone()),
    );
    Dispatcher::new(state, printer, config.cut_mode)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Number printed in double size and followed by the two trailing blank lines
fn printed_number(job: &[u8], mut candidates: impl Iterator<Item = u64>) -> Option<u64> {
    candidates.find(|n| {
        let mut needle = vec![0x1D, 0x21, 0x11];
        needle.extend_from_slice(format!("{}\n\n\n", n).as_bytes());
        contains(job, &needle)
    })
}

#[tokio::test]
async fn test_each_number_printed_twice_in_order() {
    let dir = TempDir::new().unwrap();
    let jobs: Jobs = Rc::default();
    let config = Config {
        starting_number: 500,
        ..Config::default()
    };
    let mut d = dispatcher(&dir, &config, &jobs);

    let result = d.run(&mut Pedal::pressed(7), std::future::pending()).await;
    assert!(matches!(result, Err(InputError::Read(_))));

    let jobs = jobs.borrow();
    assert_eq!(jobs.len(), 7);
    for (i, job) in jobs.iter().enumerate() {
        let expected = 500 + (i as u64) / 2;
        assert_eq!(printed_number(job, 500..510), Some(expected), "ticket {}", i);
        assert!(job.ends_with(&[0x1D, 0x56, 0x01]));
    }
}

#[tokio::test]
async fn test_counter_survives_restart() {
    let dir = TempDir::new().unwrap();
    let jobs: Jobs = Rc::default();
    let config = Config {
        starting_number: 90,
        cut_mode: CutMode::Full,
        ..Config::default()
    };

    let mut first = dispatcher(&dir, &config, &jobs);
    let _ = first.run(&mut Pedal::pressed(3), std::future::pending()).await;
    drop(first);

    // A different configured start must not reset the counter
    let restarted_config = Config {
        starting_number: 1,
        ..config.clone()
    };
    let mut second = dispatcher(&dir, &restarted_config, &jobs);
    assert_eq!(second.state().current_number(), 91);
    assert_eq!(second.state().prints_remaining(), 1);

    let _ = second.run(&mut Pedal::pressed(3), std::future::pending()).await;

    let numbers: Vec<u64> = jobs
        .borrow()
        .iter()
        .map(|job| printed_number(job, 85..100).unwrap())
        .collect();
    assert_eq!(numbers, vec![90, 90, 91, 91, 92, 92]);
    assert!(jobs.borrow().iter().all(|job| job.ends_with(&[0x1D, 0x56, 0x00])));
}
