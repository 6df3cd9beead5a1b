pub mod rubric {
    pub mod domain {
        pub mod parameter_registry;
        pub mod score_card;
        pub mod score_validator;
        pub mod scoring_parameter;
    }
}

pub mod transcription {
    pub mod domain {
        pub mod backend_response;
        pub mod transcript_acquirer;
        pub mod transcript_formatter;
        pub mod transcription_backend;
        pub mod transcription_strategy;
        pub mod utterance;
    }
    pub mod infrastructure;
}

pub mod scoring {
    pub mod domain {
        pub mod call_scorer;
        pub mod keyword_group;
        pub mod rulebook;
    }
}

pub mod feedback {
    pub mod domain {
        pub mod feedback_synthesizer;
        pub mod observation_synthesizer;
    }
}

pub mod pipeline {
    pub mod evaluate_call_use_case;
    pub mod evaluation_report;
    pub mod evaluation_result;
    pub mod infrastructure {
        pub mod threaded_batch_evaluator;
    }
}

pub mod shared {
    pub mod constants;
    pub mod settings;
}
