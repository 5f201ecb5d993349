//! Library name to include directory aliases.

/// Aliases consulted when a framework library is registered, and as the last
/// lookup before falling back to the cleaned name.
pub const INCLUDE_ALIASES: &[(&str, &str)] = &[
  ("wifi", "esp_wifi"),
  ("bluetooth", "bt"),
  ("bluetoothserial", "bt"),
  ("ble", "bt"),
  ("bt", "bt"),
  ("ethernet", "esp_eth"),
  ("websocket", "esp_websocket_client"),
  ("http", "esp_http_client"),
  ("https", "esp_https_ota"),
  ("ota", "esp_https_ota"),
  ("spiffs", "spiffs"),
  ("fatfs", "fatfs"),
  ("mesh", "esp_wifi_mesh"),
  ("smartconfig", "esp_smartconfig"),
  ("mdns", "mdns"),
  ("coap", "coap"),
  ("mqtt", "mqtt"),
  ("json", "cjson"),
  ("mbedtls", "mbedtls"),
  ("openssl", "openssl"),
  ("esp32blearduino", "bt"),
  ("esp32_ble_arduino", "bt"),
  ("esp32", "esp32"),
  ("wire", "driver"),
  ("spi", "driver"),
  ("i2c", "driver"),
  ("uart", "driver"),
  ("serial", "driver"),
  ("analogwrite", "driver"),
  ("ledc", "driver"),
  ("pwm", "driver"),
  ("dac", "driver"),
  ("adc", "driver"),
  ("touch", "driver"),
  ("hall", "driver"),
  ("rtc", "driver"),
  ("timer", "esp_timer"),
  ("preferences", "arduino_preferences"),
  ("eeprom", "arduino_eeprom"),
  ("update", "esp_https_ota"),
  ("httpupdate", "esp_https_ota"),
  ("httpclient", "esp_http_client"),
  ("httpsclient", "esp_https_ota"),
  ("wifimanager", "esp_wifi"),
  ("wificlientsecure", "esp_wifi"),
  ("wifiserver", "esp_wifi"),
  ("wifiudp", "esp_wifi"),
  ("wificlient", "esp_wifi"),
  ("wifiap", "esp_wifi"),
  ("wifimulti", "esp_wifi"),
  ("esp32webserver", "esp_http_server"),
  ("webserver", "esp_http_server"),
  ("asyncwebserver", "esp_http_server"),
  ("dnsserver", "lwip"),
  ("netbios", "netbios"),
  ("simpletime", "lwip"),
  ("fs", "vfs"),
  ("sd", "fatfs"),
  ("sd_mmc", "fatfs"),
  ("littlefs", "esp_littlefs"),
  ("ffat", "fatfs"),
  ("camera", "esp32_camera"),
  ("esp_camera", "esp32_camera"),
  ("arducam", "esp32_camera"),
  ("rainmaker", "esp_rainmaker"),
  ("esp_rainmaker", "esp_rainmaker"),
  ("provisioning", "wifi_provisioning"),
  ("wifiprovisioning", "wifi_provisioning"),
  ("espnow", "esp_now"),
  ("esp_now", "esp_now"),
  ("esptouch", "esp_smartconfig"),
  ("ping", "lwip"),
  ("netif", "lwip"),
  ("tcpip", "lwip"),
];

/// Direct aliases for names that survive prefix and suffix stripping.
pub const DIRECT_ALIASES: &[(&str, &str)] = &[("ble", "bt"), ("bluetooth", "bt"), ("bluetoothserial", "bt")];

/// Prefixes stripped in order, each at most once.
pub const STRIP_PREFIXES: &[&str] = &["lib", "arduino-", "esp32-", "esp-"];

/// Suffixes stripped in order, each at most once.
pub const STRIP_SUFFIXES: &[&str] = &["-lib", "-library", ".h"];

pub fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
  table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
