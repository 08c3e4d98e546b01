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

    let elements: Vec<StreamElement<Reading>> = vec![
        StreamElement::item((10, "sensor-1".to_string(), 1)),
        StreamElement::item((10, "sensor-2".to_string(), 2)),
        StreamElement::item((11, "sensor-1".to_string(), 3)),
        StreamElement::marker(10),
        StreamElement::item((12, "sensor-2".to_string(), 4)),
        StreamElement::marker(12),
    ];

    let out = WindowEnvironment::new("tumbling-sum")
        .from_elements(elements)
        .key_by(|r: &Reading| r.1.clone())
        .frames(WindowDefinition::tumbling(1)?, |r: &Reading| r.0)
        .aggregate(SumAggregate::new(|r: &Reading| r.2))
        .execute()?;

    for element in out {
        match element {
            StreamElement::Item(frame) => {
                println!(
                    "frame={} key={} sum={}",
                    frame.frame_seq, frame.key, frame.result
                );
            }
            StreamElement::Marker(marker) => println!("{marker}"),
        }
    }

    Ok(())
}
