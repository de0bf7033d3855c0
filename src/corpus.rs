//! Reference corpus
//!
//! The closed set of five candidate plaintexts. Every verdict is an index into
//! this table, so the strings must stay byte-for-byte identical.

use crate::alphabet::{self, Symbol};
use std::sync::OnceLock;

/// Number of reference plaintexts
pub const CORPUS_SIZE: usize = 5;

/// The reference plaintexts, in corpus order
pub const PLAINTEXTS: [&str; CORPUS_SIZE] = [
    "barmiest hastes spades fevers cause wisped unconquerable tropical pythagoras rebukingly price ephedra overdecorates linked smitten trickle scanning cognize oaken casework politicize significate influenceable precontrived clockers defalcation workwomen splintery kids placidness harebrained liberalism neuronic clavierist attendees matinees prospectively bubbies longitudinal raving relaxants rigged oxygens chronologist briniest tweezes profaning abeyances fixity gulls coquetted budgerigar drooled unassertive shelter subsoiling surmounted underwear jobbed hobnailed fulfilling jaywalking testabilit",
    "denunciation chronaxy imperilment incurred defrosted protectorates committeemen refractory narcissus bridlers weathercocks occluding orchectomy syncoms beamy opticopupillary acculturation scouting headstrong tosh preconscious weekday reich saddler mercerizes saucepan bifold regenerate chit reviewable easiness brazed essentially idler dependable predicable locales rededicated cowbird kvetched confusingly airdrops dreggier privileges tempter anaerobes glistened sartorial distrustfulness papillary ughs proctoring duplexed pitas traitorously unlighted cryptographer odysseys metamer either meliorat",
    "trenched wickerwork orientation candidnesses nets opalescing pharynxes recompensive incomes shoes porcine pursue blabbered irritable ballets grabbed scything oscillogram despots disarraying curiousest crappier friending wining cypher insubmissive oceanid bowlegs voider recook parochial trop gravidly vomiting hurray friended uncontestable situate fen cyclecars gads macrocosms dhyana overruns impolite europe cynical jennet tumor noddy canted clarion opiner incurring knobbed planeload megohm dejecting campily dedicational invaluable praecoces coalescence dibbuk bustles flay acuities centimeters l",
    "angle obliquely bean mariachi walkup toilettes squib tightwads pipe extents rejoicing nectar asker dreadfuls kidnappers interstate incrusting quintessential neglecter copycat phosphatic streakier frowning phantasmagories supinates imbibers inactivates tingly deserter steerages beggared pulsator laity salvageable bestrode interning stodgily cracker excisions quanted arranges poultries sleds shortly packages apparat fledge alderwomen halvah verdi ineffectualness entrenches franchising merchantability trisaccharide limekiln sportsmanship lassitudes recidivistic locating iou wardress estrus potboi",
    "schmeering institutor hairlocks speeder composers dramatics eyeholes progressives headmaster attractant subjugator peddlery vigil dogfights pixyish comforts aretes brewage felinities salerooms reminiscent hermaphrodism simultaneous spondaics hayfork armory refashioning battering darning tapper pancaked unaffected televiewer mussiness pollbook sieved reclines restamp cohosh excludes homelier coacts refashioned loiterer prospectively encouragers biggest pasters modernity governorships crusted buttoned wallpapered enamors supervisal nervily groaning disembody communion embosoming tattles turbans ",
];

static ENCODED: OnceLock<Vec<Vec<Symbol>>> = OnceLock::new();

/// Symbol streams for every reference plaintext, encoded once per process
pub fn encoded() -> &'static [Vec<Symbol>] {
    ENCODED.get_or_init(|| {
        PLAINTEXTS
            .iter()
            .map(|text| {
                text.bytes()
                    .filter_map(|b| alphabet::char_to_symbol(b as char))
                    .collect()
            })
            .collect()
    })
}

/// Symbol stream of one reference plaintext
pub fn plaintext(index: usize) -> Option<&'static [Symbol]> {
    encoded().get(index).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_entries_are_valid_alphabet() {
        for text in PLAINTEXTS {
            assert!(alphabet::encode(text).is_ok());
        }
    }

    #[test]
    fn test_corpus_entries_are_600_symbols() {
        for stream in encoded() {
            assert_eq!(stream.len(), 600);
        }
    }

    #[test]
    fn test_encoded_matches_codec() {
        for (i, text) in PLAINTEXTS.iter().enumerate() {
            assert_eq!(plaintext(i).unwrap(), alphabet::encode(text).unwrap().as_slice());
        }
    }

    #[test]
    fn test_plaintext_out_of_range() {
        assert!(plaintext(CORPUS_SIZE).is_none());
    }

    #[test]
    fn test_corpus_starts() {
        assert!(PLAINTEXTS[0].starts_with("barmiest hastes"));
        assert!(PLAINTEXTS[4].starts_with("schmeering institutor"));
    }
}
