//! Two independently registered topics, each with its own subscriber.

use reqbus::define_topic;

#[derive(Clone, Copy, Default, Debug)]
struct SensorBaro {
    pressure: f32,
    timestamp: u64,
}

define_topic!(sensor_baro, "sensor_baro", SensorBaro, 1, 8);
define_topic!(sensor_baro_filtered, "sensor_baro_filtered", SensorBaro, 1, 8);

fn main() {
    println!("[demo] multi-topic");

    reqbus::init(&[sensor_baro::register, sensor_baro_filtered::register])
        .expect("topic registration failed");

    let token_raw = reqbus::subscribe(&sensor_baro::METADATA).expect("failed to subscribe to sensor_baro");
    let token_filtered = reqbus::subscribe(&sensor_baro_filtered::METADATA)
        .expect("failed to subscribe to sensor_baro_filtered");

    reqbus::publish(
        &sensor_baro::METADATA,
        SensorBaro { pressure: 1013.25, timestamp: 123_456_789 },
    );
    reqbus::publish(
        &sensor_baro_filtered::METADATA,
        SensorBaro { pressure: 1012.80, timestamp: 123_456_790 },
    );

    if reqbus::check(&sensor_baro::METADATA, token_raw) {
        let received: SensorBaro = reqbus::read(&sensor_baro::METADATA, token_raw).unwrap();
        println!("[demo] raw: pressure={} timestamp={}", received.pressure, received.timestamp);
    }
    if reqbus::check(&sensor_baro_filtered::METADATA, token_filtered) {
        let received: SensorBaro = reqbus::read(&sensor_baro_filtered::METADATA, token_filtered).unwrap();
        println!(
            "[demo] filtered: pressure={} timestamp={}",
            received.pressure, received.timestamp
        );
    }

    reqbus::unsubscribe(&sensor_baro::METADATA, token_raw);
    reqbus::unsubscribe(&sensor_baro_filtered::METADATA, token_filtered);
    println!("[demo] multi-topic completed");
}
