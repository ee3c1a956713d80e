//! Tag numbers, message types and framing constants.

/// SOH field delimiter.
pub const SOH: u8 = 0x01;

/// BeginString written by the encoder.
pub const BEGIN_STRING: &str = "FIX.4.2";

// Framing
pub const BEGIN_STRING_TAG: u32 = 8;
pub const BODY_LENGTH: u32 = 9;
pub const CHECK_SUM: u32 = 10;

// Standard header
pub const MSG_TYPE: u32 = 35;
pub const MSG_SEQ_NUM: u32 = 34;
pub const SENDER_COMP_ID: u32 = 49;
pub const TARGET_COMP_ID: u32 = 56;
pub const SENDING_TIME: u32 = 52;

// Session
pub const ENCRYPT_METHOD: u32 = 98;
pub const HEART_BT_INT: u32 = 108;
pub const TEST_REQ_ID: u32 = 112;
pub const TEXT: u32 = 58;

// Orders and executions
pub const CL_ORD_ID: u32 = 11;
pub const ORDER_ID: u32 = 37;
pub const EXEC_ID: u32 = 17;
pub const EXEC_TYPE: u32 = 150;
pub const ORD_STATUS: u32 = 39;
pub const SYMBOL: u32 = 55;
pub const SIDE: u32 = 54;
pub const ORDER_QTY: u32 = 38;
pub const PRICE: u32 = 44;
pub const ORD_TYPE: u32 = 40;
pub const TRANSACT_TIME: u32 = 60;
pub const LAST_PX: u32 = 31;
pub const LAST_SHARES: u32 = 32;

// Market data
pub const NO_MD_ENTRIES: u32 = 268;
pub const MD_ENTRY_TYPE: u32 = 269;
pub const MD_ENTRY_PX: u32 = 270;
pub const MD_ENTRY_SIZE: u32 = 271;
pub const MD_UPDATE_ACTION: u32 = 279;

/// Header tags, in the order the encoder writes them.
pub const HEADER_ORDER: [u32; 5] = [
    MSG_TYPE,
    MSG_SEQ_NUM,
    SENDER_COMP_ID,
    TARGET_COMP_ID,
    SENDING_TIME,
];

/// Tags that live inside a NoMDEntries repeating-group entry.
pub const MD_ENTRY_TAGS: [u32; 4] = [MD_ENTRY_TYPE, MD_ENTRY_PX, MD_ENTRY_SIZE, MD_UPDATE_ACTION];

pub fn is_md_entry_tag(tag: u32) -> bool {
    MD_ENTRY_TAGS.contains(&tag)
}

/// Framing tags are computed by the encoder, never copied from input.
pub fn is_framing_tag(tag: u32) -> bool {
    matches!(tag, BEGIN_STRING_TAG | BODY_LENGTH | CHECK_SUM)
}

pub fn header_position(tag: u32) -> Option<usize> {
    HEADER_ORDER.iter().position(|t| *t == tag)
}

/// MsgType (35) values.
pub mod msg_type {
    pub const HEARTBEAT: &str = "0";
    pub const TEST_REQUEST: &str = "1";
    pub const LOGOUT: &str = "5";
    pub const EXECUTION_REPORT: &str = "8";
    pub const LOGON: &str = "A";
    pub const NEW_ORDER_SINGLE: &str = "D";
    pub const MARKET_DATA_SNAPSHOT: &str = "W";
    pub const MARKET_DATA_INCREMENTAL: &str = "X";
}

const TAG_NAMES: &[(u32, &str)] = &[
    (BEGIN_STRING_TAG, "BeginString"),
    (BODY_LENGTH, "BodyLength"),
    (CHECK_SUM, "CheckSum"),
    (CL_ORD_ID, "ClOrdID"),
    (EXEC_ID, "ExecID"),
    (LAST_PX, "LastPx"),
    (LAST_SHARES, "LastShares"),
    (MSG_SEQ_NUM, "MsgSeqNum"),
    (MSG_TYPE, "MsgType"),
    (ORDER_ID, "OrderID"),
    (ORDER_QTY, "OrderQty"),
    (ORD_STATUS, "OrdStatus"),
    (ORD_TYPE, "OrdType"),
    (PRICE, "Price"),
    (SENDER_COMP_ID, "SenderCompID"),
    (SENDING_TIME, "SendingTime"),
    (SIDE, "Side"),
    (SYMBOL, "Symbol"),
    (TARGET_COMP_ID, "TargetCompID"),
    (TEXT, "Text"),
    (TRANSACT_TIME, "TransactTime"),
    (ENCRYPT_METHOD, "EncryptMethod"),
    (HEART_BT_INT, "HeartBtInt"),
    (TEST_REQ_ID, "TestReqID"),
    (EXEC_TYPE, "ExecType"),
    (NO_MD_ENTRIES, "NoMDEntries"),
    (MD_ENTRY_TYPE, "MDEntryType"),
    (MD_ENTRY_PX, "MDEntryPx"),
    (MD_ENTRY_SIZE, "MDEntrySize"),
    (MD_UPDATE_ACTION, "MDUpdateAction"),
];

/// Look up a tag number by its FIX field name, e.g. `"MsgType"` -> 35.
pub fn by_name(name: &str) -> Option<u32> {
    TAG_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(tag, _)| *tag)
}
