//! ESP-NOW radio link.
//!
//! Brings WiFi up in station mode on the configured channel (no
//! association), then runs ESP-NOW on top.  The transmitter broadcasts;
//! the receiver accepts any sender and feeds payloads to
//! [`link::deliver`](super::link::deliver).

use esp_idf_hal::modem::Modem;
use esp_idf_svc::espnow::{BROADCAST, EspNow, PeerInfo};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{
    esp_wifi_set_channel, wifi_interface_t_WIFI_IF_STA, wifi_second_chan_t_WIFI_SECOND_CHAN_NONE,
};
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

use super::link::{self, RX_PACKETS};
use crate::app::ports::PacketSink;
use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::protocol::CommandPacket;

pub struct EspNowLink {
    _wifi: BlockingWifi<EspWifi<'static>>,
    espnow: EspNow<'static>,
}

impl EspNowLink {
    /// Start the radio.  Must be called once, from the main task.
    pub fn start(modem: Modem, config: &LinkConfig) -> Result<Self, LinkError> {
        let sysloop = EspSystemEventLoop::take().map_err(|e| LinkError::BringUp(e.code()))?;
        let nvs = EspDefaultNvsPartition::take().map_err(|e| LinkError::BringUp(e.code()))?;

        let esp_wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))
            .map_err(|e| LinkError::BringUp(e.code()))?;
        let mut wifi =
            BlockingWifi::wrap(esp_wifi, sysloop).map_err(|e| LinkError::BringUp(e.code()))?;
        wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))
            .map_err(|e| LinkError::BringUp(e.code()))?;
        wifi.start().map_err(|e| LinkError::BringUp(e.code()))?;

        // SAFETY: WiFi is started; the channel call only reconfigures the PHY.
        let rc = unsafe {
            esp_wifi_set_channel(config.channel, wifi_second_chan_t_WIFI_SECOND_CHAN_NONE)
        };
        if rc != 0 {
            return Err(LinkError::BringUp(rc));
        }

        let espnow = EspNow::take().map_err(|e| LinkError::BringUp(e.code()))?;
        info!("espnow: up on channel {}", config.channel);

        Ok(Self {
            _wifi: wifi,
            espnow,
        })
    }

    /// Receiver side: route every payload into [`RX_PACKETS`].
    pub fn listen(&self) -> Result<(), LinkError> {
        self.espnow
            .register_recv_cb(|_info, data: &[u8]| {
                link::deliver(&RX_PACKETS, data);
            })
            .map_err(|e| LinkError::BringUp(e.code()))?;
        info!("espnow: listening");
        Ok(())
    }

    /// Transmitter side: register the broadcast peer.
    pub fn add_broadcast_peer(&self, config: &LinkConfig) -> Result<(), LinkError> {
        self.espnow
            .add_peer(PeerInfo {
                peer_addr: BROADCAST,
                channel: config.channel,
                ifidx: wifi_interface_t_WIFI_IF_STA,
                encrypt: false,
                ..Default::default()
            })
            .map_err(|e| LinkError::Peer(e.code()))
    }
}

impl PacketSink for EspNowLink {
    fn send(&mut self, packet: CommandPacket) -> Result<(), LinkError> {
        self.espnow
            .send(BROADCAST, &packet.to_bytes())
            .map_err(|e| LinkError::SendFailed(e.code()))
    }
}
