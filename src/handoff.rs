//! Snapshot Handoff — control thread to audio thread messaging.
//!
//! [`channel`] returns a [`ControlPort`] for the control loop and an
//! [`AudioPort`] for the audio callback, joined by two lock-free SPSC ring
//! buffers. The control side computes wavetables; the audio side only
//! installs complete snapshots between blocks, so a block never mixes old
//! and new parameters.

use log::{info, warn};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::dsp::polyptic::PolypticOscillator;
use crate::dsp::wavetable::Wavetable;
use crate::error::{HandoffError, LearnError};
use crate::parameters::Parameters;

/// Control → audio.
#[derive(Debug, Clone, Copy)]
pub enum ControlMessage {
    /// A complete parameter set, with a new wavetable when the distortion
    /// settings changed.
    Snapshot {
        params: Parameters,
        wavetable: Option<Wavetable>,
    },
    EnableLearn,
    NewNote(f32),
    DisableLearn,
    Freeze(bool),
}

/// Audio → control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    ScaleLearned { slot: usize, size: usize },
    LearnFailed(LearnError),
    /// `count` events were lost to a full event queue.
    EventsDropped { count: usize },
}

pub fn channel(capacity: usize) -> (ControlPort, AudioPort) {
    let (commands, command_rx) = RingBuffer::new(capacity);
    let (event_tx, events) = RingBuffer::new(capacity);
    (
        ControlPort {
            commands,
            events,
            published: None,
        },
        AudioPort {
            commands: command_rx,
            events: event_tx,
            dropped: 0,
        },
    )
}

pub struct ControlPort {
    commands: Producer<ControlMessage>,
    events: Consumer<EngineEvent>,
    /// Last snapshot accepted by the queue.
    published: Option<Parameters>,
}

impl ControlPort {
    /// Queue a parameter snapshot. The wavetable is recomputed here when
    /// twist or warp differ from the last published snapshot.
    pub fn publish(&mut self, params: Parameters) -> Result<(), HandoffError> {
        let params = params.clamped();
        let distortion_changed = self
            .published
            .is_none_or(|last| last.twist != params.twist || last.warp != params.warp);
        let wavetable = distortion_changed.then(|| Wavetable::compute(params.twist, params.warp));
        self.send(ControlMessage::Snapshot { params, wavetable })?;
        self.published = Some(params);
        Ok(())
    }

    pub fn enable_learn(&mut self) -> Result<(), HandoffError> {
        self.send(ControlMessage::EnableLearn)
    }

    pub fn new_note(&mut self, pitch: f32) -> Result<(), HandoffError> {
        self.send(ControlMessage::NewNote(pitch))
    }

    pub fn disable_learn(&mut self) -> Result<(), HandoffError> {
        self.send(ControlMessage::DisableLearn)
    }

    pub fn freeze(&mut self, on: bool) -> Result<(), HandoffError> {
        self.send(ControlMessage::Freeze(on))
    }

    /// Drain the events the engine reported since the last call.
    pub fn poll(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.pop() {
            match event {
                EngineEvent::ScaleLearned { slot, size } => {
                    info!("Learned a {size}-note scale into slot {slot}");
                }
                EngineEvent::LearnFailed(e) => warn!("Scale learning failed: {e}"),
                EngineEvent::EventsDropped { count } => {
                    warn!("Event queue overflowed, {count} engine events lost");
                }
            }
            events.push(event);
        }
        events
    }

    fn send(&mut self, message: ControlMessage) -> Result<(), HandoffError> {
        self.commands.push(message).map_err(|_| {
            warn!("Control queue full, message dropped");
            HandoffError::Full
        })
    }
}

pub struct AudioPort {
    commands: Consumer<ControlMessage>,
    events: Producer<EngineEvent>,
    /// Events lost since the last delivered `EventsDropped`.
    dropped: usize,
}

impl AudioPort {
    /// Apply every pending command to `engine`, in order. Call between
    /// blocks; the last snapshot queued wins.
    pub fn apply<const N: usize>(&mut self, engine: &mut PolypticOscillator<N>) {
        self.flush_dropped();
        while let Ok(message) = self.commands.pop() {
            match message {
                ControlMessage::Snapshot { params, wavetable } => engine.install(params, wavetable),
                ControlMessage::EnableLearn => engine.enable_learn(),
                ControlMessage::NewNote(pitch) => {
                    if let Err(e) = engine.new_note(pitch) {
                        self.report(EngineEvent::LearnFailed(e));
                    }
                }
                ControlMessage::DisableLearn => match engine.disable_learn() {
                    Ok((slot, size)) => self.report(EngineEvent::ScaleLearned { slot, size }),
                    Err(e) => self.report(EngineEvent::LearnFailed(e)),
                },
                ControlMessage::Freeze(on) => engine.freeze(on),
            }
        }
    }

    fn report(&mut self, event: EngineEvent) {
        self.flush_dropped();
        if self.events.push(event).is_err() {
            self.dropped += 1;
        }
    }

    /// Queue the count of lost events once there is room for it.
    fn flush_dropped(&mut self) {
        if self.dropped == 0 {
            return;
        }
        let notice = EngineEvent::EventsDropped {
            count: self.dropped,
        };
        if self.events.push(notice).is_ok() {
            self.dropped = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{BLOCK_SIZE, Frame};
    use crate::parameters::{Warp, WarpMode};

    #[test]
    fn newest_snapshot_wins() {
        let (mut control, mut audio) = channel(8);
        let mut engine = PolypticOscillator::<4>::new();
        for root in [40.0, 50.0, 70.0] {
            let params = Parameters {
                root,
                ..Parameters::default()
            };
            control.publish(params).expect("queue has room");
        }
        assert_eq!(engine.parameters().root, 60.0, "nothing applies before the block boundary");
        audio.apply(&mut engine);
        assert_eq!(engine.parameters().root, 70.0);
    }

    #[test]
    fn block_sees_complete_snapshot() {
        let (mut control, mut audio) = channel(8);
        let mut engine = PolypticOscillator::<4>::new();
        let mut out = [Frame::default(); BLOCK_SIZE];

        let params = Parameters {
            root: 45.0,
            warp: Warp {
                mode: WarpMode::Cheby,
                value: 0.6,
            },
            ..Parameters::default()
        };
        control.publish(params).expect("queue has room");
        engine.process(&mut out);
        assert_ne!(engine.parameters().warp, params.warp, "published snapshot must wait for apply");

        audio.apply(&mut engine);
        assert_eq!(engine.parameters().root, 45.0);
        assert_eq!(*engine.wavetable(), Wavetable::compute(params.twist, params.warp));
    }

    #[test]
    fn wavetable_only_sent_on_distortion_change() {
        let (mut control, mut audio) = channel(8);
        let mut params = Parameters::default();
        control.publish(params).expect("queue has room");
        params.root = 30.0;
        control.publish(params).expect("queue has room");
        params.warp.value = 0.4;
        control.publish(params).expect("queue has room");

        let tables: Vec<bool> = std::iter::from_fn(|| audio.commands.pop().ok())
            .map(|m| matches!(m, ControlMessage::Snapshot { wavetable: Some(_), .. }))
            .collect();
        assert_eq!(tables, vec![true, false, true]);
    }

    #[test]
    fn full_queue_is_reported() {
        let (mut control, _audio) = channel(1);
        control.freeze(true).expect("queue has room");
        assert_eq!(control.freeze(false), Err(HandoffError::Full));
        assert_eq!(control.publish(Parameters::default()), Err(HandoffError::Full));
    }

    #[test]
    fn learn_outcomes_come_back_as_events() {
        let (mut control, mut audio) = channel(16);
        let mut engine = PolypticOscillator::<4>::new();
        let before = *engine.grid();

        control.new_note(60.0).expect("queue has room");
        control.enable_learn().expect("queue has room");
        control.new_note(60.0).expect("queue has room");
        control.disable_learn().expect("queue has room");
        audio.apply(&mut engine);
        assert_eq!(
            control.poll(),
            vec![
                EngineEvent::LearnFailed(LearnError::NotLearning),
                EngineEvent::LearnFailed(LearnError::TooFewNotes { distinct: 1 }),
            ]
        );
        assert_eq!(*engine.grid(), before, "failed learn must keep the scale");

        control.enable_learn().expect("queue has room");
        for pitch in [48.0, 51.0, 55.0] {
            control.new_note(pitch).expect("queue has room");
        }
        control.disable_learn().expect("queue has room");
        audio.apply(&mut engine);
        assert_eq!(control.poll(), vec![EngineEvent::ScaleLearned { slot: 0, size: 3 }]);
        assert_eq!(engine.grid().offsets(), &[0.0, 3.0, 7.0]);
    }

    #[test]
    fn lost_events_are_counted() {
        let (mut control, mut audio) = channel(2);
        let mut engine = PolypticOscillator::<4>::new();
        for _ in 0..2 {
            control.new_note(60.0).expect("queue has room");
        }
        audio.apply(&mut engine);
        control.new_note(62.0).expect("queue has room");
        audio.apply(&mut engine);

        let failed = EngineEvent::LearnFailed(LearnError::NotLearning);
        assert_eq!(control.poll(), vec![failed, failed]);
        audio.apply(&mut engine);
        assert_eq!(control.poll(), vec![EngineEvent::EventsDropped { count: 1 }]);
        audio.apply(&mut engine);
        assert_eq!(control.poll(), vec![], "the loss is reported once");
    }

    #[test]
    fn freeze_travels_with_the_queue() {
        let (mut control, mut audio) = channel(4);
        let mut engine = PolypticOscillator::<4>::new();
        control
            .publish(Parameters {
                freeze_mode: crate::parameters::SplitMode::Mono,
                ..Parameters::default()
            })
            .expect("queue has room");
        control.freeze(true).expect("queue has room");
        audio.apply(&mut engine);
        assert!((0..4).all(|v| engine.is_frozen(v)));
    }
}
