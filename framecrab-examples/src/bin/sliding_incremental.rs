//! Sliding-window demo on the incremental "combine leading / deduct
//! trailing" path: a 3-frame running sum per device.

use framecrab_api::environment::WindowEnvironment;
use framecrab_core::types::StreamElement;
use framecrab_core::window::{SumAggregate, WindowDefinition};

// (frame_seq, device, value)
type Reading = (i64, String, i64);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("debug".parse()?),
        )
        .init();

    let mut elements: Vec<StreamElement<Reading>> = Vec::new();
    for seq in 10..=15 {
        elements.push(StreamElement::item((seq, "sensor-1".to_string(), 1 << (seq - 10))));
        elements.push(StreamElement::marker(seq));
    }

    let out = WindowEnvironment::new("sliding-incremental-sum")
        .from_elements(elements)
        .key_by(|r: &Reading| r.1.clone())
        .frames(WindowDefinition::sliding(1, 3)?, |r: &Reading| r.0)
        .aggregate_with_deduct(SumAggregate::new(|r: &Reading| r.2))
        .execute()?;

    for element in out {
        if let StreamElement::Item(frame) = element {
            println!(
                "frame={} key={} running_sum={}",
                frame.frame_seq, frame.key, frame.result
            );
        }
    }

    Ok(())
}
