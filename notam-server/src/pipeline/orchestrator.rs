//! Flight number → notices pipeline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{FlightNumber, RouteEntry};
use crate::flights::RouteTable;
use crate::notam::{FetchError, NoticeExtractor, NoticeSource, TokenTranslator};

/// Notice text in both forms.
///
/// `translated` is always the translator's image of `original`; the only way
/// to build one is [`Notices::from_markup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
    original: String,
    translated: String,
    count: usize,
}

impl Notices {
    /// Extract and translate the notices on a fetched page.
    pub fn from_markup(
        markup: &str,
        extractor: &NoticeExtractor,
        translator: &TokenTranslator,
    ) -> Self {
        let extraction = extractor.extract(markup);
        let count = extraction.len();
        let original = extraction.into_plain();
        let translated = translator.translate(&original);
        Self {
            original,
            translated,
            count,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn translated(&self) -> &str {
        &self.translated
    }

    /// Number of notice sections found. Zero means the text is the
    /// "no notices" sentinel.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// How a search ended. Exactly one of these is shown per search.
#[derive(Debug)]
pub enum Outcome {
    /// The flight number is not in the schedule.
    UnknownFlight,
    /// The route is known but its notices page could not be fetched.
    FetchFailed(FetchError),
    /// The page was fetched; it may still have had no notices.
    Notices(Notices),
}

/// Everything a search produced.
#[derive(Debug)]
pub struct PipelineResult {
    pub flight: FlightNumber,
    pub route: Option<RouteEntry>,
    pub outcome: Outcome,
}

impl PipelineResult {
    /// Original notice text, empty unless notices were fetched.
    pub fn original(&self) -> &str {
        match &self.outcome {
            Outcome::Notices(notices) => notices.original(),
            _ => "",
        }
    }

    /// Translated notice text, empty unless notices were fetched.
    pub fn translated(&self) -> &str {
        match &self.outcome {
            Outcome::Notices(notices) => notices.translated(),
            _ => "",
        }
    }

    /// The fetch failure, if that is how the search ended.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match &self.outcome {
            Outcome::FetchFailed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_unknown_flight(&self) -> bool {
        matches!(self.outcome, Outcome::UnknownFlight)
    }
}

/// Resolves a flight, fetches its departure airport's notices, and extracts
/// and translates them.
///
/// Clones share the table, source, extractor and dictionary.
#[derive(Clone)]
pub struct Pipeline {
    routes: Arc<RouteTable>,
    source: Arc<dyn NoticeSource>,
    extractor: Arc<NoticeExtractor>,
    translator: Arc<TokenTranslator>,
}

impl Pipeline {
    /// Create a pipeline with the default extractor and dictionary.
    pub fn new(routes: RouteTable, source: impl NoticeSource + 'static) -> Self {
        Self {
            routes: Arc::new(routes),
            source: Arc::new(source),
            extractor: Arc::new(NoticeExtractor::default()),
            translator: Arc::new(TokenTranslator::default()),
        }
    }

    /// Use a different section boundary.
    pub fn with_extractor(mut self, extractor: NoticeExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Use a different dictionary.
    pub fn with_translator(mut self, translator: TokenTranslator) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Look up a flight's route without fetching anything.
    pub fn resolve(&self, flight: &FlightNumber) -> Option<RouteEntry> {
        self.routes.resolve(flight)
    }

    /// Run one search.
    ///
    /// Never fails: an unknown flight and a failed fetch are outcomes, not
    /// errors. The page is fetched afresh on every call.
    pub async fn run(&self, flight: &FlightNumber) -> PipelineResult {
        let Some(route) = self.resolve(flight) else {
            debug!(%flight, "flight not in schedule");
            return PipelineResult {
                flight: flight.clone(),
                route: None,
                outcome: Outcome::UnknownFlight,
            };
        };

        debug!(%flight, %route, "resolved flight");

        let outcome = match self.source.fetch(&route.departure).await {
            Ok(markup) => {
                let notices = Notices::from_markup(&markup, &self.extractor, &self.translator);
                info!(%flight, airport = %route.departure, count = notices.count(), "notices extracted");
                Outcome::Notices(notices)
            }
            Err(err) => {
                warn!(%flight, airport = %route.departure, error = %err, "failed to fetch notices");
                Outcome::FetchFailed(err)
            }
        };

        PipelineResult {
            flight: flight.clone(),
            route: Some(route),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AirportCode;
    use crate::notam::{MockNoticeSource, NO_NOTICES, NotamClient, NotamConfig};

    fn flight(s: &str) -> FlightNumber {
        FlightNumber::parse(s).unwrap()
    }

    fn airport(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn table() -> RouteTable {
        RouteTable::from_json(
            r#"{
                "1101": ["RKSI", "RJBB"],
                "101": ["RKSS", "RKPC"],
                "2901": ["RKSI", "VVDN"],
                "5101": ["RKPK", "RJBB"]
            }"#,
        )
        .unwrap()
    }

    fn source() -> MockNoticeSource {
        MockNoticeSource::from_pages([
            (
                airport("RKSI"),
                concat!(
                    "<html><body>",
                    "<section id=\"notam-A1/26\"><p>RUNWAY 24 <b>CLSD</b> DUE TO ACFT</p></section>",
                    "<section id=\"notam-A2/26\"><p>TWY B WIP</p></section>",
                    "</body></html>"
                )
                .to_string(),
            ),
            (airport("RKSS"), "<html><body>nothing today</body></html>".to_string()),
        ])
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(table(), source())
    }

    #[tokio::test]
    async fn unknown_flight_has_no_route_and_no_text() {
        let result = pipeline().run(&flight("9999")).await;

        assert!(result.is_unknown_flight());
        assert_eq!(result.route, None);
        assert_eq!(result.original(), "");
        assert_eq!(result.translated(), "");
        assert!(result.fetch_error().is_none());
    }

    #[tokio::test]
    async fn known_flights_resolve_to_table_entry() {
        let pipeline = pipeline();
        let table = table();
        for (number, entry) in table.iter() {
            let result = pipeline.run(number).await;
            assert_eq!(result.route, Some(*entry));
            assert_eq!(&result.flight, number);
        }
    }

    #[tokio::test]
    async fn notices_are_extracted_and_translated() {
        let result = pipeline().run(&flight("1101")).await;

        let Outcome::Notices(notices) = &result.outcome else {
            panic!("expected notices, got {:?}", result.outcome);
        };
        assert_eq!(notices.count(), 2);
        assert_eq!(result.original(), "RUNWAY 24 CLSD DUE TO ACFT\n\nTWY B WIP");
        assert_eq!(result.translated(), "활주로 24 폐쇄 DUE TO 항공기\n\n유도로 B 공사");
    }

    #[tokio::test]
    async fn page_without_sections_gives_sentinel() {
        let result = pipeline().run(&flight("101")).await;

        let Outcome::Notices(notices) = &result.outcome else {
            panic!("expected notices, got {:?}", result.outcome);
        };
        assert_eq!(notices.count(), 0);
        assert_eq!(result.original(), NO_NOTICES);
        assert_eq!(result.translated(), NO_NOTICES);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_route() {
        let result = pipeline().run(&flight("5101")).await;

        assert_eq!(
            result.route,
            Some(RouteEntry::new(airport("RKPK"), airport("RJBB")))
        );
        assert!(matches!(
            result.fetch_error(),
            Some(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(result.original(), "");
        assert_eq!(result.translated(), "");
    }

    #[tokio::test]
    async fn silent_relay_times_out_with_route_populated() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = NotamConfig::new()
            .with_relay_prefix(format!("http://{addr}/?"))
            .with_timeout(1);
        let pipeline = Pipeline::new(table(), NotamClient::new(config).unwrap());

        let result = pipeline.run(&flight("2901")).await;
        assert_eq!(
            result.route,
            Some(RouteEntry::new(airport("RKSI"), airport("VVDN")))
        );
        assert!(result.fetch_error().is_some_and(FetchError::is_timeout));
    }

    #[tokio::test]
    async fn custom_translator_is_used() {
        let translator = TokenTranslator::new([("WIP", "work in progress")].into_iter().collect());
        let pipeline = pipeline().with_translator(translator);

        let result = pipeline.run(&flight("1101")).await;
        assert_eq!(
            result.translated(),
            "RUNWAY 24 CLSD DUE TO ACFT\n\nTWY B work in progress"
        );
    }

    #[test]
    fn clones_share_extractor_and_dictionary() {
        let a = pipeline();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.extractor, &b.extractor));
        assert!(Arc::ptr_eq(&a.translator, &b.translator));
        assert!(Arc::ptr_eq(&a.routes, &b.routes));
    }
}
