/// One unit of presentation content. Paths are relative to the asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub audio: Option<&'static str>,
}

impl Slide {
    /// Badge shown above the title, e.g. "01".
    pub fn number_label(&self) -> String {
        format!("0{}", self.id)
    }
}

pub static SLIDES: [Slide; 5] = [
    Slide {
        id: 1,
        title: "Imaginando a mi audiencia",
        description: "Al comenzar a diseñar esta experiencia digital, imaginé una audiencia profundamente conectada con lo tecnológico. Visualicé usuarios que integran lo digital en todos los momentos de su vida cotidiana, incluso en espacios físicos como el entrenamiento o el bienestar personal. Esta percepción inicial surge de observar comportamientos cercanos, pero también de proyectar mis propias prácticas digitales sobre otros, evidenciando una mirada construida desde la sociología espontánea.",
        image: "imagen1.png",
        audio: Some("audio1.mp3"),
    },
    Slide {
        id: 2,
        title: "La interacción que imaginé",
        description: "Proyecté una audiencia activa, participativa y comprometida con la experiencia. Imaginé usuarios que no solo observan, sino que se involucran, exploran y permanecen dentro de la narrativa interactiva. Esta idea de participación surge desde mi expectativa como diseñador de generar experiencias que requieran atención, esfuerzo y permanencia, trasladando simbólicamente la lógica del compromiso físico al entorno digital.",
        image: "imagen2.png",
        audio: Some("audio2.mp3"),
    },
    Slide {
        id: 3,
        title: "¿Por qué sería significativa?",
        description: "Consideré que la experiencia sería significativa en la medida en que lograra capturar la atención de la audiencia de forma inmersiva. Imaginé usuarios absorbidos por estímulos visuales, narrativos y sensoriales que los desconectaran momentáneamente de su entorno inmediato. Esta proyección responde a mi interés por crear experiencias que no solo informen, sino que envuelvan emocional y perceptivamente al espectador.",
        image: "imagen3.jpeg",
        audio: Some("audio3.mp3"),
    },
    Slide {
        id: 4,
        title: "Riesgos y distancias",
        description: "Al ampliar la reflexión, reconocí que mis percepciones podían estar mediadas por suposiciones. No todas las audiencias interactúan de la manera que imagino. Comprender realmente sus motivaciones, expectativas y limitaciones exige diálogo, escucha y procesos de investigación. Esta distancia entre lo que supongo y lo que realmente ocurre evidencia los límites de diseñar desde la intuición.",
        image: "imagen4.png",
        audio: Some("audio4.mp3"),
    },
    Slide {
        id: 5,
        title: "Rompiendo la sociología espontánea",
        description: "Este ejercicio me permitió reconocer que diseñar para audiencias digitales implica pasar de la suposición a la metodología. Entendí la necesidad de investigar, analizar comportamientos y validar percepciones antes de tomar decisiones de diseño. Romper con la sociología espontánea significa construir experiencias desde el conocimiento real de los usuarios y no únicamente desde nuestras proyecciones.",
        image: "imagen5.jpeg",
        audio: Some("audio5.mp3"),
    },
];
