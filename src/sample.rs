use crate::data::RawRow;

const HEADERS: [&str; 10] = [
    "protocolo",
    "assunto",
    "subsecretaria",
    "status",
    "abertura",
    "prazo",
    "analista",
    "cidade",
    "bairro",
    "uf",
];

const ROWS: [[&str; 10]; 12] = [
    ["2025-0001", "Chegada de Processo Judicial", "SUBEXEC", "Não Iniciado", "15/09/2025", "25/09/2025", "Analista 1", "Belford Roxo", "Centro", "RJ"],
    ["2025-0002", "Emergência Ambiental", "SUBCLAM", "Em Atendimento", "16/09/2025", "26/09/2025", "Analista 2", "Belford Roxo", "Areia Branca", "RJ"],
    ["2025-0003", "Licenciamento", "SUBINFRAS", "Aguardando Solicitante", "18/09/2025", "28/09/2025", "Analista 3", "Belford Roxo", "Heliópolis", "RJ"],
    ["2025-0004", "Ouvidoria SEMAS", "SUBCLAM", "Concluída", "20/09/2025", "27/09/2025", "Analista 4", "Belford Roxo", "Centro", "RJ"],
    ["2025-0005", "Agenda SM", "SUBEXEC", "Não Iniciado", "22/09/2025", "29/09/2025", "Analista 5", "Belford Roxo", "Barro Vermelho", "RJ"],
    ["2025-0006", "Emergência Ambiental", "SUBEXEC", "Em Atendimento", "24/09/2025", "30/09/2025", "Analista 6", "Nova Iguaçu", "Centro", "RJ"],
    ["2025-0007", "Licenciamento", "SUBINFRAS", "Não Iniciado", "25/09/2025", "05/10/2025", "Analista 7", "Nova Iguaçu", "Posse", "RJ"],
    ["2025-0008", "Ouvidoria SEMAS", "SUBCLAM", "Concluída", "26/09/2025", "06/10/2025", "Analista 8", "Rio de Janeiro", "Tijuca", "RJ"],
    ["2025-0009", "Emergência Ambiental", "SUBEXEC", "Em Atendimento", "27/09/2025", "07/10/2025", "Analista 9", "Rio de Janeiro", "Méier", "RJ"],
    ["2025-0010", "Agenda SM", "SUBEXEC", "Não Iniciado", "28/09/2025", "08/10/2025", "Analista 10", "São João de Meriti", "Centro", "RJ"],
    ["2025-0011", "Chegada de Processo Judicial", "SUBCLAM", "Aguardando Solicitante", "29/09/2025", "09/10/2025", "Analista 11", "São João de Meriti", "Coelho da Rocha", "RJ"],
    ["2025-0012", "Licenciamento", "SUBINFRAS", "Concluída", "30/09/2025", "10/10/2025", "Analista 4", "Belford Roxo", "Centro", "RJ"],
];

pub fn sample_rows() -> Vec<RawRow> {
    ROWS.iter()
        .map(|row| HEADERS.iter().copied().zip(row.iter().copied()).collect())
        .collect()
}
