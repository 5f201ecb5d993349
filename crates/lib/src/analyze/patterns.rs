//! Keyword tables for usage detection.

/// Extensions of files worth scanning.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "c", "h", "hpp", "ino"];

/// Component to lowercase substrings found in project sources.
///
/// Keys are include directory names, the same names the library mapper
/// produces for `lib_ignore` entries.
pub const SOURCE_KEYWORDS: &[(&str, &[&str])] = &[
  ("bt", &["bluetooth", "ble", "nimble", "bt_", "esp_bt", "esp_ble"]),
  ("esp_wifi", &["wifi", "esp_wifi", "tcpip_adapter"]),
  ("esp_dsp", &["dsps_", "esp_dsp", "fft2r", "dsps_fft2r"]),
  ("esp_http_client", &["esp_http_client", "http_client"]),
  ("esp_https_ota", &["esp_https_ota", "esp_ota"]),
  ("mdns", &["mdns", "esp_mdns"]),
  ("mqtt", &["mqtt", "esp_mqtt"]),
  ("spiffs", &["spiffs", "esp_spiffs"]),
  ("fatfs", &["fatfs", "ff.h"]),
  ("nvs_flash", &["nvs", "nvs_flash"]),
  ("esp_timer", &["esp_timer", "timer_"]),
  ("driver", &["gpio_", "uart_", "spi_", "i2c_", "adc_", "dac_"]),
  ("esp32_camera", &["esp_camera", "camera.h"]),
  ("esp_now", &["esp_now", "espnow"]),
  ("esp_smartconfig", &["smartconfig", "esp_smartconfig"]),
  ("esp_eth", &["esp_eth", "ethernet"]),
  ("esp_websocket_client", &["websocket", "esp_websocket"]),
  ("cjson", &["cjson", "json"]),
  ("mbedtls", &["mbedtls", "ssl"]),
  ("openssl", &["openssl"]),
];

/// Component to uppercase substrings found in `lib_deps` entries.
pub const LIB_DEP_KEYWORDS: &[(&str, &[&str])] = &[
  ("bt", &["BLE", "BT", "BLUETOOTH", "NIMBLE"]),
  ("esp_wifi", &["WIFI", "ASYNCTCP", "ESPASYNCWEBSERVER"]),
  ("esp_dsp", &["DSP", "FFT", "JPEG"]),
  ("esp_http_client", &["HTTP", "HTTPCLIENT"]),
  ("mqtt", &["MQTT", "PUBSUB"]),
  ("esp32_camera", &["CAMERA", "ESP32CAM"]),
  ("esp_now", &["ESPNOW", "ESP_NOW"]),
  ("mdns", &["MDNS"]),
  ("esp_eth", &["ETHERNET"]),
];
