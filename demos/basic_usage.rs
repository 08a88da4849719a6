//! Subscribe, publish one message, read it once.

use reqbus::define_topic;

#[derive(Clone, Copy, Default, Debug)]
struct SensorTemperature {
    id: u32,
    temperature: f32,
    timestamp: u64,
}

define_topic!(sensor_temperature, "sensor_temperature", SensorTemperature, 1, 8);

fn main() {
    #[cfg(feature = "trace-log")]
    tracing_subscriber::fmt::init();

    println!("[demo] basic usage");

    reqbus::init(&[sensor_temperature::register]).expect("topic registration failed");

    let token = reqbus::subscribe(&sensor_temperature::METADATA).expect("no free subscriber slot");

    let msg = SensorTemperature {
        id: 42,
        temperature: 36.5,
        timestamp: 123_456_789,
    };
    reqbus::publish(&sensor_temperature::METADATA, msg);

    let received: SensorTemperature =
        reqbus::read(&sensor_temperature::METADATA, token).expect("expected a message");
    println!(
        "[demo] id={} temperature={} timestamp={}",
        received.id, received.temperature, received.timestamp
    );
    assert_eq!(received.id, msg.id);

    assert!(reqbus::read::<SensorTemperature>(&sensor_temperature::METADATA, token).is_none());

    reqbus::unsubscribe(&sensor_temperature::METADATA, token);
    println!("[demo] basic usage completed");
}
