//! Packed piece-square tables and their one-shot unpacker.
//!
//! The positional weights ship as 64 wide integers, one per square. Each
//! carries twelve signed bytes: slots 0-5 are middlegame offsets for
//! pawn..king, slots 6-11 the endgame offsets, with byte `i` at bits
//! `8*i..8*i+8`. Unpacking scales each offset and adds the piece's base
//! value, producing two dense `[square][piece]` arrays that never change
//! after initialisation.

use std::sync::OnceLock;

/// Base piece values in centipawns: middlegame pawn..king, then endgame
/// pawn..king. Kings carry no material value.
pub const PIECE_VALUES: [i32; 12] = [82, 337, 365, 477, 1025, 0, 94, 281, 297, 512, 936, 0];

/// Game-phase contribution per piece kind (pawn..king).
pub const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];

/// Full-material game phase: 4 minor pieces per side at weight 1, 4 rooks
/// at 2, 2 queens at 4.
pub const MAX_PHASE: i32 = 24;

/// Scale factor applied to the raw byte offsets.
const PST_SCALE: f64 = 1.461;

/// Packed per-square positional data. Only the low 96 bits of each entry
/// are significant.
#[rustfmt::skip]
const PACKED_TABLES: [u128; 64] = [
    63746705523041458768562654720, 71818693703096985528394040064, 75532537544690978830456252672, 75536154932036771593352371712,
    76774085526445040292133284352, 3110608541636285947269332480,  936945638387574698250991104,   75531285965747665584902616832,
    77047302762000299964198997571, 3730792265775293618620982364,  3121489077029470166123295018,  3747712412930601838683035969,
    3763381335243474116535455791,  8067176012614548496052660822,  4977175895537975520060507415,  2475894077091727551177487608,
    2458978764687427073924784380,  3718684080556872886692423941,  4959037324412353051075877138,  3135972447545098299460234261,
    4371494653131335197311645996,  9624249097030609585804826662,  9301461106541282841985626641,  2793818196182115168911564530,
    77683174186957799541255830262, 4660418590176711545920359433,  4971145620211324499469864196,  5608211711321183125202150414,
    5617883191736004891949734160,  7150801075091790966455611144,  5619082524459738931006868492,  649197923531967450704711664,
    75809334407291469990832437230, 78322691297526401047122740223, 4348529951871323093202439165,  4990460191572192980035045640,
    5597312470813537077508379404,  4980755617409140165251173636,  1890741055734852330174483975,  76772801025035254361275759599,
    75502243563200070682362835182, 78896921543467230670583692029, 2489164206166677455700101373,  4338830174078735659125311481,
    4960199192571758553533648130,  3420013420025511569771334658,  1557077491473974933188251927,  77376040767919248347203368440,
    73949978050619586491881614568, 77043619187199676893167803647, 1212557245150259869494540530,  3081561358716686153294085872,
    3392217589357453836837847030,  1219782446916489227407330320,  78580145051212187267589731866, 75798434925965430405537592305,
    68369566912511282590874449920, 72396532057599326246617936384, 75186737388538008131054524416, 77027917484951889231108827392,
    73655004947793353634062267392, 76417372019396591550492896512, 74568981255592060493492515584, 70529879645288096380279255040,
];

/// Dense positional lookup tables, one value per `[square][piece kind]`.
pub struct EvalTables {
    /// Middlegame values (material base + positional offset).
    pub mg: [[i32; 6]; 64],
    /// Endgame values (material base + positional offset).
    pub eg: [[i32; 6]; 64],
}

/// Expand the packed constants into dense arrays.
fn unpack() -> EvalTables {
    let mut mg = [[0i32; 6]; 64];
    let mut eg = [[0i32; 6]; 64];

    for (square, &packed) in PACKED_TABLES.iter().enumerate() {
        // Only 96 bits of significand are meaningful per square.
        debug_assert!(packed >> 96 == 0, "malformed packed table entry");

        for slot in 0..12 {
            let raw = ((packed >> (8 * slot)) & 0xFF) as u8 as i8;
            let value = (raw as f64 * PST_SCALE) as i32 + PIECE_VALUES[slot];
            if slot < 6 {
                mg[square][slot] = value;
            } else {
                eg[square][slot - 6] = value;
            }
        }
    }

    EvalTables { mg, eg }
}

static TABLES: OnceLock<EvalTables> = OnceLock::new();

/// The process-wide evaluation tables, unpacked on first use.
pub fn tables() -> &'static EvalTables {
    TABLES.get_or_init(unpack)
}
