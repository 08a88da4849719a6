//! Two independent subscribers reading the same ring buffer, plus a burst
//! of publishes within one topic's retained depth.

use reqbus::define_topic;

#[derive(Clone, Copy, Default, Debug)]
struct SensorTemperature {
    id: u32,
    temperature: f32,
    timestamp: u64,
}

define_topic!(sensor_temperature, "sensor_temperature", SensorTemperature, 4, 8);

fn main() {
    println!("[demo] multi-subscriber & ring buffer");

    reqbus::init(&[sensor_temperature::register]).expect("topic registration failed");

    let t1 = reqbus::subscribe(&sensor_temperature::METADATA).unwrap();
    let t2 = reqbus::subscribe(&sensor_temperature::METADATA).unwrap();

    for i in 0..4u32 {
        let msg = SensorTemperature {
            id: 100 + i,
            temperature: 20.0 + i as f32,
            timestamp: 1_000_000 + i as u64,
        };
        reqbus::publish(&sensor_temperature::METADATA, msg);
    }

    for (name, token) in [("t1", t1), ("t2", t2)] {
        if reqbus::check(&sensor_temperature::METADATA, token) {
            let val: SensorTemperature = reqbus::read(&sensor_temperature::METADATA, token).unwrap();
            println!("[demo] {name} sees id={} temp={}", val.id, val.temperature);
        }
    }

    // Both subscribers advance independently: each still has 3 more
    // messages queued up from the burst above.
    let mut t1_count = 1;
    while reqbus::read::<SensorTemperature>(&sensor_temperature::METADATA, t1).is_some() {
        t1_count += 1;
    }
    assert_eq!(t1_count, 4);

    reqbus::unsubscribe(&sensor_temperature::METADATA, t1);
    reqbus::unsubscribe(&sensor_temperature::METADATA, t2);
    println!("[demo] multi-subscriber & ring buffer completed");
}
