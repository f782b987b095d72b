//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                 |
//! |------------|-------------------|-----------------------------|
//! | `hardware` | LightSensorPort   | ESP32 ADC (LDR)             |
//! |            | ActuatorPort      | ESP32 PWM, GPIO             |
//! |            | LaserPort         | ESP32 GPIO                  |
//! |            | JoystickPort      | ESP32 ADC, GPIO (buttons)   |
//! | `link`     | PacketSource      | Inbound packet channel      |
//! | `espnow`   | PacketSink        | ESP-NOW broadcast           |
//! | `log_sink` | EventSink         | Serial log output           |

#[cfg(target_os = "espidf")]
pub mod espnow;
pub mod hardware;
pub mod link;
pub mod log_sink;
