use smokelink_core::{
    DecodedPacket, DecoderConfig, LengthPolicy, PacketTypeInfo, StatusInterpretation,
    TimestampStyle, UplinkError, decode_payload, decode_payload_with,
};

const SUMMARY_LABELS: [&str; 5] = [
    "removal",
    "battery end of life",
    "acoustic alarm failure",
    "obstruction detection",
    "surrounding area monitoring",
];

fn strict() -> DecoderConfig {
    DecoderConfig {
        length_policy: LengthPolicy::Strict,
        ..DecoderConfig::default()
    }
}

fn labels(record: &DecodedPacket) -> Vec<String> {
    match &record.status_interpretation {
        Some(StatusInterpretation::Labels(labels)) => labels.clone(),
        other => panic!("expected label list, got {other:?}"),
    }
}

fn is_unsigned(text: &str, max_digits: usize) -> bool {
    !text.is_empty() && text.len() <= max_digits && text.chars().all(|c| c.is_ascii_digit())
}

// 20\d\d-\d{1,2}-\d{1,2}
fn is_legacy_date(text: &str) -> bool {
    let parts: Vec<&str> = text.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 4
        && parts[0].starts_with("20")
        && is_unsigned(parts[0], 4)
        && is_unsigned(parts[1], 2)
        && is_unsigned(parts[2], 2)
}

// 20\d\d-\d{1,2}-\d{1,2}T\d{1,2}:\d{1,2}:00Z
fn is_legacy_date_time(text: &str) -> bool {
    let Some((date, time)) = text.split_once('T') else {
        return false;
    };
    let Some(time) = time.strip_suffix(":00Z") else {
        return false;
    };
    let Some((hour, minute)) = time.split_once(':') else {
        return false;
    };
    is_legacy_date(date) && is_unsigned(hour, 2) && is_unsigned(minute, 2)
}

#[test]
fn unrecognized_type_nibbles_fail() {
    for high in [0x0u8, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0xB, 0xC, 0xD, 0xE, 0xF] {
        let payload = [high << 4 | 0x1, 0x02, 0xFF];
        let record = decode_payload(&payload);
        assert_eq!(record.packet_type, None);
        assert_eq!(record.packet_type_info, None);
        assert!(!record.status_decoded);
        let info = record.status_info.expect("status_info");
        let raw = format!("{},2,255", payload[0]);
        assert!(info.contains(&raw), "{info} should contain {raw}");
    }
}

#[test]
fn monthly_status_shape_for_any_fields() {
    for raw in [0x0000_0000u32, 0xFFFF_FFFF, 0x050E_6F03, 0x3B17_FFF9, 0x8001_0110] {
        let [b1, b2, b3, b4] = raw.to_be_bytes();
        for (a, b) in [(0x00, 0x00), (0xFF, 0xFF), (0x80, 0x2C), (0x01, 0x40)] {
            let record = decode_payload(&[0x91, b1, b2, b3, b4, a, b]);
            assert_eq!(record.packet_type, Some(9));
            assert_eq!(record.packet_subtype, Some(1));
            assert!(record.status_decoded);
            let timestamp = record.timestamp.clone().expect("timestamp");
            assert!(is_legacy_date_time(&timestamp), "bad timestamp {timestamp}");
            for label in labels(&record) {
                assert!(SUMMARY_LABELS.contains(&label.as_str()), "bad label {label}");
            }
        }
    }
}

#[test]
fn monthly_status_reproduces_unpadded_minute() {
    let record = decode_payload(&[0x91, 0x05, 0x0E, 0x6F, 0x03, 0x00, 0x00]);
    assert_eq!(record.timestamp.as_deref(), Some("2024-3-15T14:5:00Z"));
    assert!(labels(&record).is_empty());
}

#[test]
fn identity_report_lines_in_order() {
    let payload = [
        0x92, 0x00, 0x01, 0x02, 0x03, 0x01, 0x00, 0x02, 0x04, 0x01, 0x40, 0x00, 0x0A, 0xBC, 0xDE,
    ];
    let record = decode_payload(&payload);
    assert_eq!(record.packet_subtype, Some(2));
    assert_eq!(record.timestamp, None);
    assert_eq!(
        labels(&record),
        vec![
            "firmware version: 10203",
            "LoRa WAN version: 1.0.2",
            "LoRa command version: 1.4",
            "device type: 40",
            "meter ID: ABCDE",
        ]
    );
}

#[test]
fn periodic_unknown_subtypes_fail() {
    for low in [0x0u8, 0x3, 0x7, 0xF] {
        let record = decode_payload(&[0x90 | low, 0, 0, 0, 0, 0, 0]);
        assert_eq!(record.packet_type, Some(9));
        assert_eq!(record.packet_subtype, None);
        assert_eq!(record.packet_type_info, Some(PacketTypeInfo::Sync));
        assert!(!record.status_decoded);
    }
}

#[test]
fn periodic_zero_subtype_scenario() {
    let record = decode_payload(&[0x90, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(record.packet_type, Some(9));
    assert_eq!(record.packet_subtype, None);
    assert!(!record.status_decoded);
    assert_eq!(
        record.status_info.as_deref(),
        Some("Error at point: 0 payload_raw: 144,0,0,0,0,0,0")
    );
}

#[test]
fn removal_event_has_date() {
    for (b3, b4) in [(0x6F, 0x03), (0x00, 0x00), (0xFF, 0xFF), (0x5F, 0x7C)] {
        let record = decode_payload(&[0xA0, 0x02, 0x00, b3, b4]);
        assert_eq!(record.packet_type, Some(1));
        assert_eq!(record.packet_subtype, Some(0));
        assert_eq!(record.packet_type_info, Some(PacketTypeInfo::Async));
        assert_eq!(
            record.status_interpretation,
            Some(StatusInterpretation::Label("removal".to_string()))
        );
        let timestamp = record.timestamp.expect("timestamp");
        assert!(is_legacy_date(&timestamp), "bad date {timestamp}");
    }
}

#[test]
fn battery_event_has_no_date() {
    let record = decode_payload(&[0xA0, 0x0C, 0x00, 0x6F, 0x03]);
    assert_eq!(
        record.status_interpretation,
        Some(StatusInterpretation::Label("battery end of life".to_string()))
    );
    assert_eq!(record.timestamp, None);
    assert!(record.status_decoded);
}

#[test]
fn unknown_event_code_is_silent() {
    let record = decode_payload(&[0xA0, 0x03, 0x00, 0x6F, 0x03]);
    assert!(record.status_decoded);
    assert_eq!(record.status_interpretation, None);
    assert_eq!(record.timestamp, None);
    assert_eq!(record.status_info, None);
}

#[test]
fn daily_status_body_is_ignored() {
    let record = decode_payload(&[0x1F, 0xAA, 0xBB]);
    assert_eq!(record.packet_type, Some(1));
    assert_eq!(record.packet_subtype, Some(0));
    assert_eq!(record.packet_type_info, Some(PacketTypeInfo::Sync));
    assert_eq!(record.status_interpretation, None);
    assert!(record.status_decoded);
}

#[test]
fn decoding_is_idempotent() {
    let payloads: [&[u8]; 5] = [
        &[0x91, 0x05, 0x0E, 0x6F, 0x03, 0x80, 0x2C],
        &[0x92, 0x00, 0x01, 0x02, 0x03],
        &[0xA0, 0x1C, 0x00, 0x5F, 0x7C],
        &[0x30],
        &[],
    ];
    for payload in payloads {
        assert_eq!(decode_payload(payload), decode_payload(payload));
    }
}

#[test]
fn strict_policy_reports_needed_length() {
    assert_eq!(
        decode_payload_with(&[0x92, 0x00, 0x01], &strict()),
        Err(UplinkError::TooShort {
            needed: 15,
            actual: 3
        })
    );
    assert!(decode_payload_with(&[0xA0, 0x16], &strict()).is_ok());
    assert!(decode_payload_with(&[0x30], &strict()).is_ok());
}

#[test]
fn zero_fill_matches_padded_payload() {
    let short = decode_payload(&[0xA0, 0x02, 0x00, 0x6F]);
    let padded = decode_payload(&[0xA0, 0x02, 0x00, 0x6F, 0x00]);
    assert_eq!(short, padded);
}

#[test]
fn iso8601_style_pads_timestamps() {
    let config = DecoderConfig {
        timestamp_style: TimestampStyle::Iso8601,
        ..DecoderConfig::default()
    };
    let record =
        decode_payload_with(&[0x91, 0x05, 0x0E, 0x6F, 0x03, 0x00, 0x00], &config).unwrap();
    assert_eq!(record.timestamp.as_deref(), Some("2024-03-15T14:05:00Z"));

    let record = decode_payload_with(&[0xA0, 0x1C, 0x00, 0x5F, 0x7C], &config).unwrap();
    assert_eq!(record.timestamp.as_deref(), Some("2023-12-31"));
}
