//! Host-side helpers and integration tests for the Morse writer

use morse_core::mock::Event;

#[cfg(test)]
mod hal_adapter_tests;

/// One stretch of constant line state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub keyed: bool,
    pub ms: u32,
}

impl Segment {
    pub const fn on(ms: u32) -> Self {
        Self { keyed: true, ms }
    }

    pub const fn off(ms: u32) -> Self {
        Self { keyed: false, ms }
    }
}

/// Collapse recorded events into (state, duration) segments.
///
/// Back-to-back holds in the same state are merged, so a dot's trailing
/// gap and a following letter gap read as one 4 unit silence.
pub fn timeline(events: &[Event]) -> Vec<Segment> {
    let mut keyed = false;
    let mut segments: Vec<Segment> = Vec::new();

    for event in events {
        match *event {
            Event::KeyDown => keyed = true,
            Event::KeyUp => keyed = false,
            Event::Delay(ms) => match segments.last_mut() {
                Some(last) if last.keyed == keyed => last.ms += ms,
                _ => segments.push(Segment { keyed, ms }),
            },
        }
    }

    segments
}

/// Render segments as a strip, one character per unit
pub fn render(segments: &[Segment], unit_ms: u32) -> String {
    segments
        .iter()
        .flat_map(|segment| {
            let c = if segment.keyed { '=' } else { '.' };
            std::iter::repeat(c).take((segment.ms / unit_ms.max(1)) as usize)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_merges_silence() {
        let events = [
            Event::KeyDown,
            Event::Delay(100),
            Event::KeyUp,
            Event::Delay(100),
            Event::KeyUp,
            Event::Delay(300),
        ];

        assert_eq!(timeline(&events), vec![Segment::on(100), Segment::off(400)]);
    }

    #[test]
    fn test_render() {
        let segments = [Segment::on(300), Segment::off(100), Segment::on(100)];
        assert_eq!(render(&segments, 100), "===.=");
    }
}
