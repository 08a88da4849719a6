//! Publish/read interleaved one message at a time, ten times in a row.

use reqbus::define_topic;

#[derive(Clone, Copy, Default, Debug, PartialEq)]
struct SensorTemperature {
    id: u32,
    temperature: f32,
    timestamp: u64,
}

define_topic!(sensor_temperature, "sensor_temperature", SensorTemperature, 1, 8);

fn main() {
    println!("[demo] sequential publish");

    reqbus::init(&[sensor_temperature::register]).expect("topic registration failed");
    let token = reqbus::subscribe(&sensor_temperature::METADATA).unwrap();

    for i in 0..10u32 {
        let msg = SensorTemperature {
            id: i,
            temperature: i as f32 * 1.5,
            timestamp: 123_456_789 + i as u64,
        };
        reqbus::publish(&sensor_temperature::METADATA, msg);

        let out: SensorTemperature = reqbus::read(&sensor_temperature::METADATA, token).unwrap();
        println!(
            "[demo] id={} temperature={} timestamp={}",
            out.id, out.temperature, out.timestamp
        );
        assert_eq!(out, msg);
        assert!(reqbus::read::<SensorTemperature>(&sensor_temperature::METADATA, token).is_none());
    }

    reqbus::unsubscribe(&sensor_temperature::METADATA, token);
    println!("[demo] sequential publish completed");
}
