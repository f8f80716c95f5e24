//! The value tree serializes to JSON and back unchanged (serde feature).

#![cfg(feature = "serde")]

use nuntius_message::Message;

#[test]
fn message_tree_survives_json() {
    let message = Message::parse_text(
        "MSH|^~\\&|SA|SF|RA|RF|20110613083617||ADT^A04|123|P|2.7\rEVN|A04|20110613083617||\"\"\r",
    )
    .unwrap();

    let json = serde_json::to_string(&message).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();

    assert_eq!(back, message);
    assert_eq!(back.serialize(false).unwrap(), message.serialize(false).unwrap());
}
