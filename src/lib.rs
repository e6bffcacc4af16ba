pub mod traits;
pub mod position;
pub mod placed_word;
pub mod grid;
pub mod registry;
pub mod crossword;
pub mod generator;
pub mod selection;
pub mod config;
pub mod log;


#[cfg(test)]
mod tests
{
    use self::{config::GeneratorConfig, generator::{CrosswordGenerationRequest, CrosswordStream}};
    use tokio_stream::StreamExt;

    use super::*;

    #[tokio::test]
    async fn it_works()
    {
        let config = GeneratorConfig { seed: Some(11), max_attempts: 50, ..Default::default() };

        let mut str = CrosswordStream::new(config);
        str.request_crossword(CrosswordGenerationRequest::Count(3)).await.unwrap();
        str.request_crossword(CrosswordGenerationRequest::Stop).await.unwrap();

        let mut crosswords = vec![];
        while let Some(cw) = str.next().await
        {
            crosswords.push(cw);
        }

        assert_eq!(crosswords.len(), 3);
        for cw in crosswords.iter().flatten()
        {
            assert!(cw.is_consistent());
            assert_eq!(cw.grid().letter_runs().len(), cw.words().len());
        }
        println!("{}", serde_json::to_string_pretty(&crosswords.into_iter().flatten().collect::<Vec<_>>()).unwrap());
    }

    #[tokio::test]
    async fn stream_ends_without_requests()
    {
        let str = CrosswordStream::new(GeneratorConfig::default());
        str.request_crossword(CrosswordGenerationRequest::Stop).await.unwrap();

        assert_eq!(str.collect::<Vec<_>>().await.len(), 0);
    }
}
