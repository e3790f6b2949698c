//! Keyword template behavior as seen by callers naming converted books.

use fb2pack::template::{
    AuthorName, BookInfo, Keywords, author_keywords, expand, file_name_keywords, title_keywords,
};

fn kw(pairs: &[(&str, &str)]) -> Keywords {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_documented_properties() {
    assert_eq!(expand("{#x}", &Keywords::new()), "");
    assert_eq!(expand("a{#x}b", &kw(&[("#x", "")])), "ab");
    assert_eq!(expand("a{#x}b", &kw(&[("#x", "Y")])), "aYb");
    assert_eq!(
        expand(
            "#authors-#author",
            &kw(&[("#author", "A"), ("#authors", "A and B")])
        ),
        "A and B-A"
    );
    assert_eq!(expand("\\{literal\\}", &Keywords::new()), "{literal}");
}

#[test]
fn test_file_name_pattern_with_series() {
    let book = BookInfo::new("Hard to Be a God")
        .with_series("Noon Universe", 4)
        .with_authors("Arkady Strugatsky, Boris Strugatsky", "Arkady Strugatsky")
        .with_id("0b1c2d");
    let keywords = file_name_keywords(&book, 2);

    assert_eq!(
        expand("#author/{#series/}{#padnumber - }#title", &keywords),
        "Arkady Strugatsky/Noon Universe/04 - Hard to Be a God"
    );
}

#[test]
fn test_file_name_pattern_without_series() {
    let book = BookInfo::new("Monday Begins on Saturday")
        .with_authors("Arkady Strugatsky, Boris Strugatsky", "Arkady Strugatsky");
    let keywords = file_name_keywords(&book, 2);

    assert_eq!(
        expand("#author/{#series/}{#padnumber - }#title", &keywords),
        "Arkady Strugatsky/Monday Begins on Saturday"
    );
}

#[test]
fn test_title_pattern_with_abbreviation() {
    let book = BookInfo::new("Ubik").with_series("Philip K Dick Collection", 12);
    let keywords = title_keywords(&book, 3);

    assert_eq!(expand("{[#abbrseries-#padnumber] }#title", &keywords), "[pkdc-012] Ubik");
    assert_eq!(expand("#title{ (#date)}", &keywords), "Ubik");
}

#[test]
fn test_author_pattern() {
    let name = AuthorName::new("Ursula", "Le Guin").with_middle("Kroeber");
    let keywords = author_keywords(&name);

    assert_eq!(expand("#l #f{ #m}", &keywords), "Le Guin Ursula Kroeber");
    assert_eq!(expand("#l #fi{ #mi}", &keywords), "Le Guin U. K.");

    let name = AuthorName {
        last: Some("Homer".into()),
        ..Default::default()
    };
    assert_eq!(expand("#l{, #f}", &author_keywords(&name)), "Homer");
}

#[test]
fn test_escaped_braces_around_expanded_block() {
    let keywords = kw(&[("#series", "Dune"), ("#number", "2")]);
    assert_eq!(
        expand("\\{#series\\}{ #number}", &keywords),
        "{Dune} 2"
    );
}
