//! Shared fixtures for unit tests.

use crate::dictionary::Dictionary;

/// Opening of *A Tale of Two Cities*, letters only.
pub(crate) const DICKENS: &str = "itwasthebestoftimesitwastheworstoftimesitwastheageofwisdomitwastheageoffoolishnessitwastheepochofbeliefitwastheepochofincredulityitwasthetimeoflightitwasthetimeofdarknessitwasthespringofhopeitwasthewinterofdespairwehadeverythingbeforeuswehadnothingbeforeuswewereallgoingdirecttoheavenwewereallgoingdirecttheotherway";

/// Opening of *Pride and Prejudice*, letters only.
pub(crate) const AUSTEN: &str = "itisatruthuniversallyacknowledgedthatasinglemaninpossessionofagoodfortunemustbeinwantofawifehoweverlittleknownthefeelingsorviewsofsuchamanmaybeonhisfirstenteringaneighbourhoodthistruthissowellfixedinthemindsofthesurroundingfamiliesthatheisconsideredtherightfulpropertyofsomeoneorotheroftheirdaughtersmydearmrbennetsaidhisladytohimonedayhaveyouheardthatnetherfieldparkisletatlastmrbennetrepliedthathehadnotbutitisreturnedsheformrslonghasjustbeenhereandshetoldmeallaboutitmrbennetmadenoanswer";

/// Every word needed to segment [`DICKENS`].
pub(crate) const WORDS: &str = "a\ni\nit\nwas\nthe\nbest\nof\ntimes\nworst\nage\nwisdom\nfoolishness\nepoch\nbelief\nincredulity\ntime\nlight\ndarkness\nspring\nhope\nwinter\ndespair\nwe\nhad\neverything\nbefore\nus\nnothing\nwere\nall\ngoing\ndirect\nto\nheaven\nother\nway\n";

pub(crate) fn words() -> Dictionary {
    Dictionary::parse(WORDS)
}
