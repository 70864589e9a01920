pub const HDSP_ADDRESS: u8 = 0x20; // MCP23017 #1, drives both displays
pub const INPUTS_ADDRESS: u8 = 0x21; // MCP23017 #2, port B push buttons
pub const HALF_WIDTH: u8 = 8;
pub const DISPLAY_WIDTH: u8 = 16; // two chained HDSP-211x
pub const MAX_POSITION: u8 = DISPLAY_WIDTH - 1;
pub const ADDRESS_MASK: u8 = 0x07; // A0-A2
pub const HALF_SELECT: u8 = 0x08; // bit 3: right-hand display
pub const CHARACTER_MASK: u8 = 0x7F; // D7 is not wired
pub const DATA_LINES: usize = 7;
pub const ADDRESS_LINES: usize = 3;
pub const BLANK: u8 = b' ';
pub const DEFAULT_DATE_OFFSET_HOURS: i64 = -4;
pub const MONTHS: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

/// Expander pin numbers as wired on the board: 0-7 are GPA0-GPA7, 8-15 are GPB0-GPB7.
pub mod pin {
    pub const D0: u8 = 0;
    pub const D1: u8 = 1;
    pub const D2: u8 = 2;
    pub const D3: u8 = 3;
    pub const D4: u8 = 4;
    pub const D5: u8 = 5;
    pub const D6: u8 = 6;
    pub const A0: u8 = 8;
    pub const A1: u8 = 9;
    pub const A2: u8 = 10;
    pub const CE1: u8 = 11; // enable, left display
    pub const WR1: u8 = 12; // write strobe, left display
    pub const CE2: u8 = 13; // enable, right display
    pub const WR2: u8 = 14; // write strobe, right display
    pub const RST: u8 = 15; // shared reset

    pub const DATA: [u8; 7] = [D0, D1, D2, D3, D4, D5, D6];
    pub const ADDRESS: [u8; 3] = [A0, A1, A2];
    pub const INPUTS: [u8; 8] = [8, 9, 10, 11, 12, 13, 14, 15]; // GPB0-GPB7 on the second expander
}

#[allow(dead_code)]
pub mod register {
    // bank 0 addressing (IOCON.BANK = 0 after power-on reset)
    pub const IODIRA: u8 = 0x00;
    pub const IODIRB: u8 = 0x01;
    pub const IPOLA: u8 = 0x02;
    pub const IPOLB: u8 = 0x03;
    pub const GPINTENA: u8 = 0x04;
    pub const GPINTENB: u8 = 0x05;
    pub const IOCON: u8 = 0x0A;
    pub const GPPUA: u8 = 0x0C;
    pub const GPPUB: u8 = 0x0D;
    pub const GPIOA: u8 = 0x12;
    pub const GPIOB: u8 = 0x13;
    pub const OLATA: u8 = 0x14;
    pub const OLATB: u8 = 0x15;

    pub mod iodir {
        pub const ALL_OUTPUT: u8 = 0x00;
        pub const ALL_INPUT: u8 = 0xFF; // power-on default
    }
}
